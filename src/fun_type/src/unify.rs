use tracing::trace;

use crate::{Type, TypeStore, TypeVariableId};

/// Why two types could not be made equal.
/// The types inside are fully resolved at the moment the failure was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnificationError {
    /// Two constructor types had different names or different numbers of arguments.
    #[error("type mismatch: {left} != {right}")]
    Mismatch { left: Type, right: Type },
    /// Solving would need a type that contains itself, such as `'a = 'a -> int`.
    #[error("recursive type unification: {variable} occurs in {ty}")]
    Recursive { variable: Type, ty: Type },
}

impl TypeStore {
    /// Makes `a` and `b` equal by resolving as few variables as possible.
    ///
    /// The arguments of two constructor types are unified pairwise, left to right,
    /// and every failing pair is reported rather than only the first.
    pub fn unify(&mut self, a: &Type, b: &Type) -> Result<(), Vec<UnificationError>> {
        let a = self.prune(a);
        let b = self.prune(b);
        match (&a, &b) {
            (Type::Variable(x), Type::Variable(y)) if x == y => Ok(()),
            (Type::Variable(x), _) => {
                if self.occurs_in(*x, &b) {
                    let error = UnificationError::Recursive {
                        variable: a.clone(),
                        ty: self.resolve(&b),
                    };
                    trace!("{}", error);
                    Err(vec![error])
                } else {
                    self.set_link(*x, b);
                    Ok(())
                }
            }
            (Type::Constructor { .. }, Type::Variable(_)) => self.unify(&b, &a),
            (
                Type::Constructor {
                    name: left_name,
                    args: left_args,
                },
                Type::Constructor {
                    name: right_name,
                    args: right_args,
                },
            ) => {
                if left_name != right_name || left_args.len() != right_args.len() {
                    let error = UnificationError::Mismatch {
                        left: self.resolve(&a),
                        right: self.resolve(&b),
                    };
                    trace!("{}", error);
                    return Err(vec![error]);
                }
                let mut errors = Vec::new();
                for (left, right) in left_args.iter().zip(right_args) {
                    if let Err(mut more) = self.unify(left, right) {
                        errors.append(&mut more);
                    }
                }
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    }

    /// Does the unresolved variable `variable` appear anywhere inside `ty`?
    pub fn occurs_in(&mut self, variable: TypeVariableId, ty: &Type) -> bool {
        match self.prune(ty) {
            Type::Variable(other) => other == variable,
            Type::Constructor { args, .. } => args.iter().any(|arg| self.occurs_in(variable, arg)),
        }
    }

    /// Structural equality of what `a` and `b` currently stand for.
    /// Two variables are equal when they are in the same equivalence class.
    pub fn equal(&mut self, a: &Type, b: &Type) -> bool {
        match (self.prune(a), self.prune(b)) {
            (Type::Variable(x), Type::Variable(y)) => x == y,
            (
                Type::Constructor {
                    name: left_name,
                    args: left_args,
                },
                Type::Constructor {
                    name: right_name,
                    args: right_args,
                },
            ) => {
                left_name == right_name
                    && left_args.len() == right_args.len()
                    && left_args
                        .iter()
                        .zip(&right_args)
                        .all(|(left, right)| self.equal(left, right))
            }
            _ => false,
        }
    }
}
