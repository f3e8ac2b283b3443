use std::collections::HashMap;

use fun_ast::{
    ConstantValue, DeclarationP, ExprP, FunctionDeclarationP, ModuleP, Operator, OperatorCategory,
    PatternP, ValueDeclarationP,
};
use fun_common::location::{Range, Ranged};
use fun_type::{NonGenericVariables, Type, TypeStore};
use tracing::trace;

use crate::{
    annotation::lower_annotation,
    environment::TypeEnvironment,
    error::{ConstraintReason, TypeError},
};

/// Infers the types of one alpha converted module.
///
/// The environment is flat: alpha conversion made every binding's name unique,
/// so scoping is already taken care of. The non-generic variables are threaded through
/// the recursion instead, as they must shrink again when a clause has been checked.
#[derive(Debug, Default)]
pub struct TypeInference {
    store: TypeStore,
    environment: TypeEnvironment,
    errors: Vec<TypeError>,
    /// Type variables named in annotations of the current top level declaration.
    annotation_variables: HashMap<String, Type>,
}

impl TypeInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infers every declaration of the module in order.
    pub fn infer_module(&mut self, module: &ModuleP) {
        let non_generic = NonGenericVariables::root();
        for declaration in &module.declarations {
            self.annotation_variables.clear();
            self.infer_declaration(&non_generic, declaration);
        }
    }

    /// Consumes the inference state, returning every binding's type, resolved as far as
    /// the constraints allow, together with every error found.
    pub fn finish(mut self) -> (TypeEnvironment, Vec<TypeError>) {
        self.environment.resolve_all(&mut self.store);
        (self.environment, self.errors)
    }

    /// Requires `a` and `b` to be equal, recording an error if they cannot be.
    fn unify(&mut self, a: &Type, b: &Type, range: Range, reason: ConstraintReason) {
        if let Err(errors) = self.store.unify(a, b) {
            for error in errors {
                trace!("{} at {} ({:?})", error, range, reason);
                self.errors.push(TypeError::Unification {
                    error,
                    range,
                    reason: reason.clone(),
                });
            }
        }
    }

    fn infer_declaration(&mut self, non_generic: &NonGenericVariables, declaration: &DeclarationP) {
        match declaration {
            DeclarationP::Value(value) => self.infer_value(non_generic, value),
            DeclarationP::Function(function) => self.infer_function(non_generic, function),
        }
    }

    /// The declared name is bound to the type of its body without being marked non-generic,
    /// so any variable left free in that type is generalised at each later use.
    fn infer_value(&mut self, non_generic: &NonGenericVariables, value: &ValueDeclarationP) {
        let ty = self.infer_expr(non_generic, &value.body);
        if let Some(annotation) = &value.ty {
            let annotated =
                lower_annotation(annotation, &mut self.store, &mut self.annotation_variables);
            self.unify(
                &annotated,
                &ty,
                value.body.range(),
                ConstraintReason::Annotation {
                    annotation: annotation.range(),
                },
            );
        }
        trace!("val {} : {}", value.name, self.store.resolve(&ty));
        self.environment.insert(value.name.key(), ty);
    }

    /// All clauses share one variable per argument position and one for the result.
    /// The function's name is bound to the arrow over these variables before any clause is
    /// checked, so recursive calls are typed against the same variables. While a clause is
    /// checked, these variables are non-generic, so recursive calls are monomorphic.
    fn infer_function(&mut self, non_generic: &NonGenericVariables, function: &FunctionDeclarationP) {
        let first = match function.clauses.first() {
            Some(first) => first,
            None => panic!("function declarations must have at least one clause"),
        };
        let arguments = (0..first.patterns.len())
            .map(|_| self.store.fresh_variable())
            .collect::<Vec<_>>();
        let result = self.store.fresh_variable();
        let function_type = Type::curried(arguments.iter().cloned(), result.clone());
        self.environment.insert(first.name.key(), function_type.clone());

        for clause in &function.clauses {
            let mut clause_non_generic = non_generic.child();
            for variable in arguments.iter().chain(std::iter::once(&result)) {
                if let Type::Variable(id) = variable {
                    clause_non_generic.bind(*id, ());
                }
            }

            for (pattern, argument) in clause.patterns.iter().zip(&arguments) {
                let pattern_type = self.infer_pattern(&mut clause_non_generic, pattern);
                self.unify(
                    &pattern_type,
                    argument,
                    pattern.range(),
                    ConstraintReason::Pattern,
                );
            }
            // Clauses with too many patterns were reported by alpha conversion.
            // Their extra patterns are still bound, so the body can be checked.
            for pattern in clause.patterns.iter().skip(arguments.len()) {
                self.infer_pattern(&mut clause_non_generic, pattern);
            }

            let body_type = self.infer_expr(&clause_non_generic, &clause.body);
            self.unify(
                &result,
                &body_type,
                clause.body.range(),
                ConstraintReason::ClauseResult,
            );
            if let Some(annotation) = &clause.result_type {
                let annotated =
                    lower_annotation(annotation, &mut self.store, &mut self.annotation_variables);
                self.unify(
                    &result,
                    &annotated,
                    clause.body.range(),
                    ConstraintReason::Annotation {
                        annotation: annotation.range(),
                    },
                );
            }
        }

        trace!(
            "fun {} : {}",
            first.name,
            self.store.resolve(&function_type)
        );
    }

    /// Variables bound by a pattern are added to the environment, and are non-generic
    /// for the rest of the clause.
    ///
    /// A variable that alpha conversion refused to bind (a duplicate in its pattern) still
    /// gets a type, but no environment entry, so nothing can refer to it.
    fn infer_pattern(&mut self, non_generic: &mut NonGenericVariables, pattern: &PatternP) -> Type {
        match pattern {
            PatternP::Constant { value, .. } => constant_type(value),
            PatternP::Variable(name) => {
                let variable = self.store.fresh_variable();
                if let Type::Variable(id) = variable {
                    non_generic.bind(id, ());
                }
                if let Some(unique_name) = name.resolved() {
                    self.environment.insert(unique_name, variable.clone());
                }
                variable
            }
        }
    }

    fn infer_expr(&mut self, non_generic: &NonGenericVariables, expr: &ExprP) -> Type {
        match expr {
            ExprP::Constant { value, .. } => constant_type(value),
            // A reference that alpha conversion could not resolve is never looked up.
            ExprP::Variable(name) => match name
                .resolved()
                .and_then(|unique_name| self.environment.get(unique_name))
                .cloned()
            {
                Some(ty) => self.store.fresh_instance(&ty, non_generic),
                None => {
                    self.errors.push(TypeError::UndefinedSymbol {
                        name: name.key().to_string(),
                        range: name.range,
                    });
                    self.store.fresh_variable()
                }
            },
            ExprP::Not { expr: operand, .. } => {
                let ty = self.infer_expr(non_generic, operand);
                self.unify(&Type::bool(), &ty, operand.range(), ConstraintReason::NotOperand);
                Type::bool()
            }
            ExprP::Negate { expr: operand, .. } => {
                let ty = self.infer_expr(non_generic, operand);
                if !self.require_numeric(&ty, expr.range(), None) {
                    self.errors.push(TypeError::NonNumericNegation {
                        actual: self.store.resolve(&ty),
                        range: expr.range(),
                    });
                }
                ty
            }
            ExprP::Infix {
                operator,
                left,
                right,
            } => {
                let left_type = self.infer_expr(non_generic, left);
                let right_type = self.infer_expr(non_generic, right);
                self.unify(
                    &right_type,
                    &left_type,
                    expr.range(),
                    ConstraintReason::Operands {
                        operator: operator.operator,
                    },
                );
                self.infer_operator(operator.operator, left_type, expr.range())
            }
            ExprP::Tuple { elements, .. } => Type::tuple(
                elements
                    .iter()
                    .map(|element| self.infer_expr(non_generic, element))
                    .collect(),
            ),
            ExprP::Sequence { elements, .. } => {
                let mut ty = Type::unit();
                for element in elements {
                    ty = self.infer_expr(non_generic, element);
                }
                ty
            }
            ExprP::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let condition_type = self.infer_expr(non_generic, condition);
                self.unify(
                    &Type::bool(),
                    &condition_type,
                    condition.range(),
                    ConstraintReason::Condition,
                );
                let then_type = self.infer_expr(non_generic, then_branch);
                let else_type = self.infer_expr(non_generic, else_branch);
                self.unify(
                    &then_type,
                    &else_type,
                    else_branch.range(),
                    ConstraintReason::Branches {
                        then_branch: then_branch.range(),
                    },
                );
                then_type
            }
            ExprP::Lambda { matches, .. } => {
                let argument = self.store.fresh_variable();
                let result = self.store.fresh_variable();
                for arm in matches {
                    let mut arm_non_generic = non_generic.child();
                    let pattern_type = self.infer_pattern(&mut arm_non_generic, &arm.pattern);
                    self.unify(
                        &pattern_type,
                        &argument,
                        arm.pattern.range(),
                        ConstraintReason::Pattern,
                    );
                    let body_type = self.infer_expr(&arm_non_generic, &arm.body);
                    self.unify(
                        &result,
                        &body_type,
                        arm.body.range(),
                        ConstraintReason::ClauseResult,
                    );
                }
                Type::arrow(argument, result)
            }
            ExprP::Apply(function, argument) => {
                let argument_type = self.infer_expr(non_generic, argument);
                let function_type = self.infer_expr(non_generic, function);
                let result = self.store.fresh_variable();
                self.unify(
                    &function_type,
                    &Type::arrow(argument_type, result.clone()),
                    function.range(),
                    ConstraintReason::Application {
                        argument: argument.range(),
                    },
                );
                result
            }
            ExprP::Let {
                declarations, body, ..
            } => {
                for declaration in declarations {
                    self.infer_declaration(non_generic, declaration);
                }
                self.infer_expr(non_generic, body)
            }
            ExprP::Annotated { expr: inner, ty } => {
                let inferred = self.infer_expr(non_generic, inner);
                let annotated = lower_annotation(ty, &mut self.store, &mut self.annotation_variables);
                self.unify(
                    &annotated,
                    &inferred,
                    inner.range(),
                    ConstraintReason::Annotation {
                        annotation: ty.range(),
                    },
                );
                inferred
            }
        }
    }

    /// Checks the operand type of an infix operator (both operands have already been unified),
    /// and returns the type of the whole expression.
    fn infer_operator(&mut self, operator: Operator, operand: Type, range: Range) -> Type {
        match operator.category() {
            category @ (OperatorCategory::Arithmetic | OperatorCategory::Comparison) => {
                if !self.require_numeric(&operand, range, Some(operator)) {
                    self.errors.push(TypeError::NonNumericOperand {
                        operator,
                        actual: self.store.resolve(&operand),
                        range,
                    });
                }
                if category == OperatorCategory::Arithmetic {
                    operand
                } else {
                    Type::bool()
                }
            }
            OperatorCategory::Logical => {
                if let Type::Variable(_) = self.store.prune(&operand) {
                    self.unify(
                        &operand,
                        &Type::bool(),
                        range,
                        ConstraintReason::OperandDefault {
                            operator: Some(operator),
                        },
                    );
                } else if !self.store.equal(&operand, &Type::bool()) {
                    self.errors.push(TypeError::NonBooleanOperand {
                        operator,
                        actual: self.store.resolve(&operand),
                        range,
                    });
                }
                Type::bool()
            }
        }
    }

    /// Returns whether `ty` is `int` or `float`.
    /// A type that is still unknown defaults to `int`.
    fn require_numeric(&mut self, ty: &Type, range: Range, operator: Option<Operator>) -> bool {
        if let Type::Variable(_) = self.store.prune(ty) {
            self.unify(
                ty,
                &Type::int(),
                range,
                ConstraintReason::OperandDefault { operator },
            );
            return true;
        }
        self.store.equal(ty, &Type::int()) || self.store.equal(ty, &Type::float())
    }
}

fn constant_type(value: &ConstantValue) -> Type {
    match value {
        ConstantValue::Unit => Type::unit(),
        ConstantValue::Bool(_) => Type::bool(),
        ConstantValue::Int(_) => Type::int(),
        ConstantValue::Float(_) => Type::float(),
        ConstantValue::String(_) => Type::string(),
        ConstantValue::Char(_) => Type::char(),
    }
}
