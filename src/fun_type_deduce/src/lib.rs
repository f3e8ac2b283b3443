//! Hindley-Milner type inference with let-polymorphism.
//!
//! Inference runs over a module that has already been alpha converted, so every binding
//! has a unique name. Errors never stop inference: each problem is recorded, and inference
//! carries on with a best-effort type so that independent problems are reported together.

mod annotation;
mod environment;
mod error;
mod infer;

pub use environment::TypeEnvironment;
pub use error::{ConstraintReason, TypeError};
pub use infer::TypeInference;

use fun_ast::ModuleP;
use fun_common::{diagnostic::DiagnosticResult, location::SourceFileIdentifier};
use tracing::debug;

/// Infers the type of every binding in the module.
///
/// The returned environment lists every value, function and pattern variable in the order
/// they were bound. If there were errors, it is a best-effort result: some types may be
/// wrong or left as unresolved variables.
pub fn infer(module: &ModuleP) -> (TypeEnvironment, Vec<TypeError>) {
    debug!("inferring types of {} declarations", module.declarations.len());
    let mut inference = TypeInference::new();
    inference.infer_module(module);
    let (environment, errors) = inference.finish();
    debug!(
        "type inference finished with {} bindings and {} errors",
        environment.len(),
        errors.len()
    );
    (environment, errors)
}

/// As [infer], but reports errors as diagnostics in the given file.
/// The environment is always present, even if there were errors.
pub fn deduce_types(
    source_file: &SourceFileIdentifier,
    module: &ModuleP,
) -> DiagnosticResult<TypeEnvironment> {
    let (environment, errors) = infer(module);
    let messages = errors
        .into_iter()
        .map(|error| error.into_message(source_file))
        .collect();
    DiagnosticResult::ok_with_many(environment, messages)
}
