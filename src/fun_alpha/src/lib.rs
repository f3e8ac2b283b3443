//! Alpha conversion.
//!
//! Every binding site (value name, function name, pattern variable) is given a name that is
//! unique across the whole module, of the form `<name><separator><counter>`, and every
//! reference is rewritten to the unique name of the binding it refers to. After this pass,
//! later stages never need to reason about shadowing.

mod error;

pub use error::AlphaError;

use fun_ast::{DeclarationP, ExprP, ModuleP, NameP, PatternP};
use fun_common::{
    config::FrontEndConfig,
    diagnostic::DiagnosticResult,
    location::{Range, SourceFileIdentifier},
    scope::Scope,
};
use tracing::{debug, trace};

/// What a name in scope refers to.
#[derive(Debug, Clone)]
struct Binding {
    unique_name: String,
    range: Range,
}

type NameScope<'p> = Scope<'p, String, Binding>;

/// Renames the identifiers of one module. The counter lives here, so independent
/// converters never interfere with each other.
pub struct AlphaConverter<'a> {
    config: &'a FrontEndConfig,
    /// The suffix given to the most recent binding. Starts at zero, so the first binding gets 1.
    counter: u32,
    errors: Vec<AlphaError>,
}

impl<'a> AlphaConverter<'a> {
    pub fn new(config: &'a FrontEndConfig) -> Self {
        Self {
            config,
            counter: 0,
            errors: Vec::new(),
        }
    }

    /// Renames every identifier in the module in place.
    /// Errors are accumulated; call [AlphaConverter::into_errors] to retrieve them.
    pub fn convert_module(&mut self, module: &mut ModuleP) {
        let mut scope = NameScope::root();
        for declaration in &mut module.declarations {
            self.convert_declaration(&mut scope, declaration);
        }
    }

    pub fn into_errors(self) -> Vec<AlphaError> {
        self.errors
    }

    fn unique_name(&mut self, name: &str) -> String {
        self.counter += 1;
        format!("{}{}{}", name, self.config.unique_separator, self.counter)
    }

    /// Gives `name` a fresh unique name and binds it in the current scope.
    fn bind(&mut self, scope: &mut NameScope, name: &mut NameP) {
        let unique_name = self.unique_name(&name.name);
        trace!("binding {} as {}", name.name, unique_name);
        name.resolve(unique_name.clone());
        scope.bind(
            name.name.clone(),
            Binding {
                unique_name,
                range: name.range,
            },
        );
    }

    fn convert_declaration(&mut self, scope: &mut NameScope, declaration: &mut DeclarationP) {
        match declaration {
            DeclarationP::Value(value) => {
                // The body cannot see the name being declared.
                self.convert_expr(scope, &mut value.body);
                self.bind(scope, &mut value.name);
            }
            DeclarationP::Function(function) => {
                let (function_name, unique_name, arity) = match function.clauses.first_mut() {
                    Some(first) => {
                        self.bind(scope, &mut first.name);
                        (
                            first.name.name.clone(),
                            first.name.key().to_string(),
                            first.patterns.len(),
                        )
                    }
                    None => panic!("function declarations must have at least one clause"),
                };

                for (i, clause) in function.clauses.iter_mut().enumerate() {
                    if i != 0 {
                        if clause.name.name != function_name {
                            self.errors.push(AlphaError::InconsistentFunctionName {
                                name: clause.name.name.clone(),
                                expected: function_name.clone(),
                                range: clause.name.range,
                            });
                        }
                        if clause.patterns.len() != arity {
                            self.errors.push(AlphaError::InconsistentFunctionArity {
                                function: function_name.clone(),
                                expected: arity,
                                actual: clause.patterns.len(),
                                range: clause.name.range,
                            });
                        }
                        clause.name.resolve(unique_name.clone());
                    }

                    // Parameters are not shared between clauses.
                    let mut clause_scope = scope.child();
                    for pattern in &mut clause.patterns {
                        self.convert_pattern(&mut clause_scope, pattern);
                    }
                    self.convert_expr(&clause_scope, &mut clause.body);
                }
            }
        }
    }

    fn convert_pattern(&mut self, scope: &mut NameScope, pattern: &mut PatternP) {
        match pattern {
            PatternP::Constant { .. } => {}
            PatternP::Variable(name) => {
                if scope.contains_local(name.name.as_str()) {
                    let first_binding = scope
                        .lookup(name.name.as_str())
                        .map(|binding| binding.range)
                        .unwrap_or(name.range);
                    self.errors.push(AlphaError::DuplicateIdentifierInPattern {
                        name: name.name.clone(),
                        range: name.range,
                        first_binding,
                    });
                } else {
                    self.bind(scope, name);
                }
            }
        }
    }

    fn convert_reference(&mut self, scope: &NameScope, name: &mut NameP) {
        if name.name == self.config.placeholder {
            self.errors
                .push(AlphaError::PlaceholderInReferencePosition {
                    placeholder: name.name.clone(),
                    range: name.range,
                });
            return;
        }
        match scope.lookup(name.name.as_str()) {
            Some(binding) => name.resolve(binding.unique_name.clone()),
            None => {
                trace!("{} is undefined", name.name);
                self.errors.push(AlphaError::UndefinedVariable {
                    name: name.name.clone(),
                    range: name.range,
                });
            }
        }
    }

    fn convert_expr(&mut self, scope: &NameScope, expr: &mut ExprP) {
        match expr {
            ExprP::Constant { .. } => {}
            ExprP::Variable(name) => self.convert_reference(scope, name),
            ExprP::Not { expr, .. } | ExprP::Negate { expr, .. } => self.convert_expr(scope, expr),
            ExprP::Infix { left, right, .. } => {
                self.convert_expr(scope, left);
                self.convert_expr(scope, right);
            }
            ExprP::Tuple { elements, .. } | ExprP::Sequence { elements, .. } => {
                for element in elements {
                    self.convert_expr(scope, element);
                }
            }
            ExprP::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.convert_expr(scope, condition);
                self.convert_expr(scope, then_branch);
                self.convert_expr(scope, else_branch);
            }
            ExprP::Lambda { matches, .. } => {
                for arm in matches {
                    let mut arm_scope = scope.child();
                    self.convert_pattern(&mut arm_scope, &mut arm.pattern);
                    self.convert_expr(&arm_scope, &mut arm.body);
                }
            }
            ExprP::Apply(function, argument) => {
                self.convert_expr(scope, function);
                self.convert_expr(scope, argument);
            }
            ExprP::Let {
                declarations, body, ..
            } => {
                let mut let_scope = scope.child();
                for declaration in declarations {
                    self.convert_declaration(&mut let_scope, declaration);
                }
                self.convert_expr(&let_scope, body);
            }
            ExprP::Annotated { expr, .. } => self.convert_expr(scope, expr),
        }
    }
}

/// Renames every identifier in `module`, returning the renamed module and every error found.
/// The walk never stops early, so the renamed module is always complete; identifiers that
/// could not be resolved are left unresolved.
pub fn convert(mut module: ModuleP, config: &FrontEndConfig) -> (ModuleP, Vec<AlphaError>) {
    debug!(
        "alpha converting {} declarations",
        module.declarations.len()
    );
    let mut converter = AlphaConverter::new(config);
    converter.convert_module(&mut module);
    let errors = converter.into_errors();
    debug!("alpha conversion finished with {} errors", errors.len());
    (module, errors)
}

/// As [convert], but reports errors as diagnostics in the given file.
/// The renamed module is always present, even if there were errors.
pub fn alpha_convert(
    source_file: &SourceFileIdentifier,
    module: ModuleP,
    config: &FrontEndConfig,
) -> DiagnosticResult<ModuleP> {
    let (module, errors) = convert(module, config);
    let messages = errors
        .into_iter()
        .map(|error| error.into_message(source_file))
        .collect();
    DiagnosticResult::ok_with_many(module, messages)
}
