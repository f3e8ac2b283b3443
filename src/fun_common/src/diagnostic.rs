use crate::location::{Location, Range, Ranged, SourceFileIdentifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub source_file: SourceFileIdentifier,
    /// If the location is not specified, then the diagnostic refers to the entire file.
    pub range: Option<Range>,
}

impl Diagnostic {
    pub fn in_file(source_file: &SourceFileIdentifier) -> Self {
        Self {
            source_file: source_file.clone(),
            range: None,
        }
    }

    pub fn at_location(source_file: &SourceFileIdentifier, location: Location) -> Self {
        Self {
            source_file: source_file.clone(),
            range: Some(location.into()),
        }
    }

    pub fn at(source_file: &SourceFileIdentifier, range: &impl Ranged) -> Self {
        Self {
            source_file: source_file.clone(),
            range: Some(range.range()),
        }
    }
}

/// <https://rustc-dev-guide.rust-lang.org/diagnostics.html#diagnostic-levels>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelpType {
    Help,
    Note,
}

/// Represents an error or warning displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
    pub severity: Severity,
    pub diagnostic: Diagnostic,
    pub help: Vec<HelpMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpMessage {
    pub message: String,
    pub help_type: HelpType,
    pub diagnostic: Diagnostic,
}

impl HelpMessage {
    pub fn note(message: String, diagnostic: Diagnostic) -> Self {
        Self {
            message,
            help_type: HelpType::Note,
            diagnostic,
        }
    }
}

impl ErrorMessage {
    pub fn new(message: String, severity: Severity, diagnostic: Diagnostic) -> Self {
        Self {
            message,
            severity,
            diagnostic,
            help: Vec::new(),
        }
    }

    pub fn new_with(
        message: String,
        severity: Severity,
        diagnostic: Diagnostic,
        help: HelpMessage,
    ) -> Self {
        Self {
            message,
            severity,
            diagnostic,
            help: vec![help],
        }
    }

    pub fn new_with_many(
        message: String,
        severity: Severity,
        diagnostic: Diagnostic,
        help: Vec<HelpMessage>,
    ) -> Self {
        Self {
            message,
            severity,
            diagnostic,
            help,
        }
    }
}

/// Semantic analysis keeps going after a user error so that one run reports as many
/// independent problems as possible. So we need a result type that can carry error
/// messages while still retaining an 'Ok' state, as far as the rest of the code is aware.
///
/// Callers inspect the messages for errors to decide whether the value can be trusted;
/// a value that comes with errors is a best-effort value.
#[derive(Debug)]
#[must_use = "error messages inside a diagnostic result must be reported"]
pub struct DiagnosticResult<T> {
    /// If this is `None`, then the computation failed and `messages` contains at least one error.
    /// If this is `Some`, then the computation produced a value, but there may still be
    /// messages (e.g. warnings or errors) inside `messages`.
    value: Option<T>,
    messages: Vec<ErrorMessage>,
}

impl<T> From<T> for DiagnosticResult<T> {
    fn from(value: T) -> Self {
        Self::ok(value)
    }
}

impl<T> From<Result<T, ErrorMessage>> for DiagnosticResult<T> {
    fn from(result: Result<T, ErrorMessage>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(error) => Self::fail(error),
        }
    }
}

impl<T> DiagnosticResult<T> {
    /// The computation succeeded with no messages.
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            messages: Vec::new(),
        }
    }

    /// The computation produced a value, but also some error or warning messages.
    pub fn ok_with_many(value: T, messages: Vec<ErrorMessage>) -> Self {
        Self {
            value: Some(value),
            messages,
        }
    }

    /// The computation failed. An error message is mandatory if the computation failed.
    pub fn fail(message: ErrorMessage) -> Self {
        assert!(message.severity == Severity::Error);
        Self {
            value: None,
            messages: vec![message],
        }
    }

    /// Apply an infallible operation to the value inside this result.
    /// If the operation could fail, use [`DiagnosticResult::bind`] instead.
    pub fn map<F, U>(self, f: F) -> DiagnosticResult<U>
    where
        F: FnOnce(T) -> U,
    {
        DiagnosticResult {
            value: self.value.map(f),
            messages: self.messages,
        }
    }

    /// A monadic bind operation that consumes this diagnostic result and uses the value it contains, if it exists,
    /// to produce a new diagnostic result. Messages are kept in order: ours first, then the new ones.
    pub fn bind<F, U>(mut self, f: F) -> DiagnosticResult<U>
    where
        F: FnOnce(T) -> DiagnosticResult<U>,
    {
        match self.value {
            Some(value) => {
                let mut result = f(value);
                self.messages.append(&mut result.messages);
                DiagnosticResult {
                    value: result.value,
                    messages: self.messages,
                }
            }
            None => DiagnosticResult {
                value: None,
                messages: self.messages,
            },
        }
    }

    /// Appends messages to this diagnostic result, regardless of whether the result succeeded or failed.
    pub fn with_many(mut self, mut messages: Vec<ErrorMessage>) -> Self {
        self.messages.append(&mut messages);
        self
    }

    /// Converts a successful diagnostic that had one or more `Error` messages into a failed diagnostic (with the same messages).
    /// Diagnostics without `Error` messages are unaffected.
    pub fn deny(self) -> Self {
        if self.has_errors() {
            Self {
                value: None,
                messages: self.messages,
            }
        } else {
            self
        }
    }

    /// Returns true if any message has `Error` severity.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    /// Returns true if the computation produced a value.
    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }

    /// Returns true if the computation failed.
    pub fn failed(&self) -> bool {
        self.value.is_none()
    }

    /// Splits up this diagnostic result into its value and its error messages.
    /// It is your responsibility to report these messages; dropping them hides errors
    /// and lets invalid programs be considered correct.
    pub fn destructure(self) -> (Option<T>, Vec<ErrorMessage>) {
        (self.value, self.messages)
    }

    /// Retrieves the value for inspection.
    pub fn value(&self) -> &Option<T> {
        &self.value
    }

    pub fn messages(&self) -> &[ErrorMessage] {
        &self.messages
    }
}
