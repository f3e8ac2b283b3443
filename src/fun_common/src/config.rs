//! Options that tune the behaviour of the front-end, usually read from a `fun.toml` file.

use serde::Deserialize;

use crate::{
    diagnostic::{Diagnostic, DiagnosticResult, ErrorMessage, Severity},
    location::{Location, SourceFileIdentifier},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontEndConfig {
    /// The identifier that may bind a value but never refer to one.
    pub placeholder: String,
    /// Placed between a binding's original name and its counter, e.g. the `$` in `x$3`.
    pub unique_separator: String,
    /// If true, a module that produced any error is reported as failed,
    /// and the best-effort results are discarded.
    pub deny_on_error: bool,
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self {
            placeholder: "_".to_string(),
            unique_separator: "$".to_string(),
            deny_on_error: true,
        }
    }
}

impl FrontEndConfig {
    /// Parses a configuration file. Missing keys take their default values.
    pub fn from_toml(source_file: &SourceFileIdentifier, contents: &str) -> DiagnosticResult<Self> {
        match toml::from_str::<FrontEndConfig>(contents) {
            Ok(config) => match config.validate() {
                Ok(()) => DiagnosticResult::ok(config),
                Err(problem) => DiagnosticResult::fail(ErrorMessage::new(
                    format!("'{}' contained an error: {}", source_file, problem),
                    Severity::Error,
                    Diagnostic::in_file(source_file),
                )),
            },
            Err(err) => {
                let (line, col) = err.line_col().unwrap_or((0, 0));
                DiagnosticResult::fail(ErrorMessage::new(
                    format!("'{}' contained an error: {}", source_file, err),
                    Severity::Error,
                    Diagnostic::at_location(source_file, Location::new(line as u32, col as u32)),
                ))
            }
        }
    }

    /// Checks that resolved names cannot collide.
    ///
    /// A resolved name is the original name, the separator, then the counter. If the
    /// separator could continue an identifier, `a1` bound first and `a` bound eleventh
    /// would both become `a11`, so the separator must start with some other character.
    pub fn validate(&self) -> Result<(), String> {
        match self.unique_separator.chars().next() {
            None => Err("the unique separator must not be empty".to_string()),
            Some(c) if c.is_alphanumeric() || c == '_' || c == '\'' => Err(format!(
                "the unique separator '{}' must not start with a character that may appear in an identifier",
                self.unique_separator
            )),
            Some(_) => Ok(()),
        }
    }
}
