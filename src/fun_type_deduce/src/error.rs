use fun_ast::Operator;
use fun_common::{
    diagnostic::{Diagnostic, ErrorMessage, HelpMessage, Severity},
    location::{Range, SourceFileIdentifier},
};
use fun_type::{Type, UnificationError};

/// Why two types were required to be equal.
/// This is used to explain a failed unification to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintReason {
    /// The condition of an `if` expression must be a `bool`.
    Condition,
    /// Both branches of an `if` expression must have the same type.
    Branches { then_branch: Range },
    /// Both operands of an infix operator must have the same type.
    Operands { operator: Operator },
    /// An operand of unknown type was assumed to be a number or a `bool`, as the operator requires.
    OperandDefault { operator: Option<Operator> },
    /// The operand of `not` must be a `bool`.
    NotOperand,
    /// A function must accept the type of the argument it is applied to.
    Application { argument: Range },
    /// Every clause of a function or lambda must accept the same argument types.
    Pattern,
    /// Every clause of a function or lambda must produce the same result type.
    ClauseResult,
    /// The programmer wrote down what the type must be.
    Annotation { annotation: Range },
}

impl ConstraintReason {
    fn note(&self, source_file: &SourceFileIdentifier, range: Range) -> Option<HelpMessage> {
        let (message, range) = match self {
            ConstraintReason::Condition => (
                "the condition of an if expression must have type bool".to_string(),
                range,
            ),
            ConstraintReason::Branches { then_branch } => (
                "the else branch must have the same type as this then branch".to_string(),
                *then_branch,
            ),
            ConstraintReason::Operands { operator } => (
                format!("both operands of '{}' must have the same type", operator),
                range,
            ),
            ConstraintReason::OperandDefault { .. } => return None,
            ConstraintReason::NotOperand => (
                "the operand of 'not' must have type bool".to_string(),
                range,
            ),
            ConstraintReason::Application { argument } => (
                "the function was applied to this argument".to_string(),
                *argument,
            ),
            ConstraintReason::Pattern => (
                "every clause must accept the same argument types".to_string(),
                range,
            ),
            ConstraintReason::ClauseResult => (
                "every clause must produce the same result type".to_string(),
                range,
            ),
            ConstraintReason::Annotation { annotation } => {
                ("the type was annotated here".to_string(), *annotation)
            }
        };
        Some(HelpMessage::note(
            message,
            Diagnostic::at(source_file, &range),
        ))
    }
}

/// A problem found while inferring types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A reference to a name that has no type in the environment.
    /// This normally follows an undefined variable found by alpha conversion.
    #[error("undefined symbol '{name}'")]
    UndefinedSymbol { name: String, range: Range },
    #[error("{error}")]
    Unification {
        error: UnificationError,
        range: Range,
        reason: ConstraintReason,
    },
    #[error("operator '{operator}' can only be applied to numbers, but got {actual}")]
    NonNumericOperand {
        operator: Operator,
        actual: Type,
        range: Range,
    },
    #[error("operator '{operator}' can only be applied to bool values, but got {actual}")]
    NonBooleanOperand {
        operator: Operator,
        actual: Type,
        range: Range,
    },
    #[error("negation can only be applied to a number, but got {actual}")]
    NonNumericNegation { actual: Type, range: Range },
}

impl TypeError {
    pub fn range(&self) -> Range {
        match self {
            TypeError::UndefinedSymbol { range, .. }
            | TypeError::Unification { range, .. }
            | TypeError::NonNumericOperand { range, .. }
            | TypeError::NonBooleanOperand { range, .. }
            | TypeError::NonNumericNegation { range, .. } => *range,
        }
    }

    pub fn into_message(self, source_file: &SourceFileIdentifier) -> ErrorMessage {
        let range = self.range();
        let help = match &self {
            TypeError::Unification { reason, .. } => {
                reason.note(source_file, range).into_iter().collect()
            }
            _ => Vec::new(),
        };
        ErrorMessage::new_with_many(
            self.to_string(),
            Severity::Error,
            Diagnostic::at(source_file, &range),
            help,
        )
    }
}
