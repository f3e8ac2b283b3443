//! This crate contains functions to pretty-print error messages against the source code they refer to.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    io::{self, Write},
    ops::Range,
};

use ariadne::{Cache, Color, Config, Label, Report, ReportKind, Source};
use fun_common::{
    diagnostic::{Diagnostic, DiagnosticResult, ErrorMessage, HelpType, Severity},
    location::{Location, SourceFileIdentifier},
};

type Span = (SourceFileIdentifier, Range<usize>);

/// The text of every source file that diagnostics may refer to.
#[derive(Default)]
pub struct SourceMap {
    sources: BTreeMap<SourceFileIdentifier, Source>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_file: SourceFileIdentifier, contents: &str) {
        self.sources
            .insert(source_file, Source::from(contents.to_string()));
    }

    /// Converts a diagnostic's line and column range into a character offset range.
    /// A diagnostic without a range, or in a file we don't know, points at the start of the file.
    fn span(&self, diagnostic: &Diagnostic) -> Span {
        let range = match (diagnostic.range, self.sources.get(&diagnostic.source_file)) {
            (Some(range), Some(source)) => {
                location_to_character(source, range.start)..location_to_character(source, range.end)
            }
            _ => 0..1,
        };
        (diagnostic.source_file.clone(), range)
    }
}

struct SourceMapCache<'a> {
    sources: &'a BTreeMap<SourceFileIdentifier, Source>,
}

impl Cache<SourceFileIdentifier> for SourceMapCache<'_> {
    fn fetch(&mut self, id: &SourceFileIdentifier) -> Result<&Source, Box<dyn Debug + '_>> {
        match self.sources.get(id) {
            Some(source) => Ok(source),
            None => Err(Box::new(format!("no source text was registered for {}", id))),
        }
    }

    fn display<'a>(&self, id: &'a SourceFileIdentifier) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(id))
    }
}

/// Returns the character offset for the given location in the source.
/// Locations past the end of the file are clamped to the end of the file.
fn location_to_character(source: &Source, loc: Location) -> usize {
    match source.lines().nth(loc.line as usize) {
        Some(line) => line.offset() + (loc.col as usize).min(line.len()),
        None => source.lines().last().map_or(0, |line| line.span().end),
    }
}

/// Collects error and warning messages, then prints them with the relevant lines of source code.
#[must_use = "error messages must be emitted using the emit_all method"]
pub struct ErrorEmitter<'s> {
    /// Order of emission of the messages is preserved.
    messages: Vec<ErrorMessage>,
    /// If this is true, warnings will not be cached or emitted.
    has_emitted_error: bool,
    color: bool,
    sources: &'s SourceMap,
}

impl<'s> ErrorEmitter<'s> {
    pub fn new(sources: &'s SourceMap) -> Self {
        Self {
            messages: Vec::new(),
            has_emitted_error: false,
            color: true,
            sources,
        }
    }

    /// Whether to colour the output with terminal escape codes. On by default.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Consumes the errors of a diagnostic result, yielding the encapsulated value.
    pub fn consume_diagnostic<T>(&mut self, diagnostic_result: DiagnosticResult<T>) -> Option<T> {
        let (value, messages) = diagnostic_result.destructure();
        self.process(messages);
        value
    }

    /// Adds some messages to this error emitter.
    pub fn process(&mut self, messages: impl IntoIterator<Item = ErrorMessage>) {
        for message in messages {
            match message.severity {
                Severity::Warning => {
                    if !self.has_emitted_error {
                        self.messages.push(message);
                    }
                }
                Severity::Error => {
                    self.has_emitted_error = true;
                    self.messages.push(message);
                }
            }
        }
    }

    /// Writes one message to `out`.
    /// Help messages become separate advice reports; notes become extra labels on the main report.
    pub fn emit(&self, message: ErrorMessage, out: &mut impl Write) -> io::Result<()> {
        let config = Config::default().with_color(self.color);
        let span = self.sources.span(&message.diagnostic);
        let mut builder = Report::<Span>::build(
            match message.severity {
                Severity::Error => ReportKind::Error,
                Severity::Warning => ReportKind::Warning,
            },
            message.diagnostic.source_file.clone(),
            span.1.start,
        )
        .with_config(config)
        .with_message(&message.message)
        .with_label(
            Label::new(span)
                .with_message(message.message)
                .with_priority(10)
                .with_color(match message.severity {
                    Severity::Error => Color::Red,
                    Severity::Warning => Color::Yellow,
                }),
        );

        let mut other_builders = Vec::new();
        for help in message.help {
            let span = self.sources.span(&help.diagnostic);
            match help.help_type {
                HelpType::Help => {
                    let builder = Report::<Span>::build(
                        ReportKind::Advice,
                        help.diagnostic.source_file,
                        span.1.start,
                    )
                    .with_config(config)
                    .with_label(
                        Label::new(span)
                            .with_message(help.message)
                            .with_priority(10)
                            // This is the "advice" colour used by ariadne.
                            .with_color(Color::Fixed(147)),
                    );
                    other_builders.push(builder);
                }
                HelpType::Note => {
                    builder = builder.with_label(
                        Label::new(span)
                            .with_message(help.message)
                            .with_color(Color::Cyan),
                    );
                }
            }
        }

        builder.finish().write(
            SourceMapCache {
                sources: &self.sources.sources,
            },
            &mut *out,
        )?;
        for builder in other_builders {
            builder.finish().write(
                SourceMapCache {
                    sources: &self.sources.sources,
                },
                &mut *out,
            )?;
        }
        Ok(())
    }

    /// Writes all error and warning messages to `out`. If an error was emitted, returns true.
    /// Once an error has been seen, warnings are no longer shown.
    pub fn emit_all(mut self, out: &mut impl Write) -> io::Result<bool> {
        let messages = std::mem::take(&mut self.messages);
        for message in messages {
            if message.severity == Severity::Error || !self.has_emitted_error {
                self.emit(message, out)?;
            }
        }
        Ok(self.has_emitted_error)
    }
}
