use fun_common::{
    diagnostic::{Diagnostic, ErrorMessage, HelpMessage, Severity},
    location::{Range, SourceFileIdentifier},
};

/// A problem with how names are bound or used in a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphaError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, range: Range },
    #[error("cannot use the placeholder '{placeholder}' as a reference")]
    PlaceholderInReferencePosition { placeholder: String, range: Range },
    #[error("duplicate identifier '{name}' in pattern")]
    DuplicateIdentifierInPattern {
        name: String,
        range: Range,
        /// Where the name was first bound in the same pattern list.
        first_binding: Range,
    },
    #[error("function name is not consistent: {name}")]
    InconsistentFunctionName {
        name: String,
        /// The name given in the first clause.
        expected: String,
        range: Range,
    },
    #[error("function arity is not consistent: the arity of '{function}' is {expected}, but this clause has {actual} patterns")]
    InconsistentFunctionArity {
        function: String,
        expected: usize,
        actual: usize,
        range: Range,
    },
}

impl AlphaError {
    pub fn range(&self) -> Range {
        match self {
            AlphaError::UndefinedVariable { range, .. }
            | AlphaError::PlaceholderInReferencePosition { range, .. }
            | AlphaError::DuplicateIdentifierInPattern { range, .. }
            | AlphaError::InconsistentFunctionName { range, .. }
            | AlphaError::InconsistentFunctionArity { range, .. } => *range,
        }
    }

    pub fn into_message(self, source_file: &SourceFileIdentifier) -> ErrorMessage {
        let diagnostic = Diagnostic::at(source_file, &self.range());
        let help = match &self {
            AlphaError::DuplicateIdentifierInPattern {
                name,
                first_binding,
                ..
            } => vec![HelpMessage::note(
                format!("'{}' was first bound here", name),
                Diagnostic::at(source_file, first_binding),
            )],
            AlphaError::InconsistentFunctionName { expected, .. } => vec![HelpMessage::note(
                format!("every clause of this function must be named '{}'", expected),
                Diagnostic::at(source_file, &self.range()),
            )],
            _ => Vec::new(),
        };
        ErrorMessage::new_with_many(self.to_string(), Severity::Error, diagnostic, help)
    }
}
