//! The semantic front-end of Fun.
//!
//! A parsed [ModuleP] goes through two stages:
//! - alpha conversion ([fun_alpha]), which gives every binding a unique name and resolves
//!   each reference to its binding;
//! - type inference ([fun_type_deduce]), which assigns a type to every binding.
//!
//! Errors from the first stage do not stop the second, so one run reports every problem
//! it can find.

use fun_alpha::alpha_convert;
use fun_ast::ModuleP;
use fun_common::{
    config::FrontEndConfig,
    diagnostic::{Diagnostic, DiagnosticResult, ErrorMessage, Severity},
    location::SourceFileIdentifier,
};
use fun_type_deduce::deduce_types;
use tracing::info;

pub use fun_type_deduce::TypeEnvironment;

/// A module that has been through the whole front-end.
#[derive(Debug, Clone)]
pub struct CheckedModule {
    /// The module, with every identifier resolved to its unique name.
    pub module: ModuleP,
    /// The type of every binding in the module, keyed by unique name.
    pub types: TypeEnvironment,
}

/// Alpha converts and type checks a module.
///
/// Messages from alpha conversion come before messages from type inference.
/// If `config.deny_on_error` is set, any error makes the result fail; otherwise the
/// best-effort module and types are returned together with the errors.
/// A configuration that fails [FrontEndConfig::validate] is reported without checking anything.
pub fn check(
    source_file: &SourceFileIdentifier,
    module: ModuleP,
    config: &FrontEndConfig,
) -> DiagnosticResult<CheckedModule> {
    info!("checking {}", source_file);
    if let Err(problem) = config.validate() {
        return DiagnosticResult::fail(ErrorMessage::new(
            format!("invalid configuration: {}", problem),
            Severity::Error,
            Diagnostic::in_file(source_file),
        ));
    }
    let result = alpha_convert(source_file, module, config).bind(|module| {
        deduce_types(source_file, &module).map(|types| CheckedModule { module, types })
    });
    info!(
        "checked {} with {} messages",
        source_file,
        result.messages().len()
    );
    if config.deny_on_error {
        result.deny()
    } else {
        result
    }
}
