use std::collections::HashMap;

use fun_common::scope::Scope;

use crate::{Type, TypeStore, TypeVariableId};

/// The type variables that belong to function or lambda parameters currently being solved.
/// These must stay monomorphic, so instantiation never copies them.
/// A child set is pushed for each clause and dropped once that clause has been checked.
pub type NonGenericVariables<'p> = Scope<'p, TypeVariableId, ()>;

impl TypeStore {
    /// A variable is generic if it occurs in none of the non-generic variables,
    /// after following what each of them has been resolved to.
    pub fn is_generic(&mut self, variable: TypeVariableId, non_generic: &NonGenericVariables) -> bool {
        !non_generic.any_key(|id| self.occurs_in(variable, &Type::Variable(*id)))
    }

    /// Copies `ty`, replacing every generic variable with a new one.
    /// Repeated occurrences of one generic variable become repeated occurrences of the same
    /// new variable, so `'a -> 'a` instantiates to `'b -> 'b`.
    pub fn fresh_instance(&mut self, ty: &Type, non_generic: &NonGenericVariables) -> Type {
        let mut mapping = HashMap::new();
        self.fresh_instance_with(ty, non_generic, &mut mapping)
    }

    fn fresh_instance_with(
        &mut self,
        ty: &Type,
        non_generic: &NonGenericVariables,
        mapping: &mut HashMap<TypeVariableId, Type>,
    ) -> Type {
        match self.prune(ty) {
            Type::Variable(id) => {
                if !self.is_generic(id, non_generic) {
                    return Type::Variable(id);
                }
                if let Some(existing) = mapping.get(&id) {
                    return existing.clone();
                }
                let fresh = self.fresh_variable();
                mapping.insert(id, fresh.clone());
                fresh
            }
            Type::Constructor { name, args } => Type::Constructor {
                name,
                args: args
                    .iter()
                    .map(|arg| self.fresh_instance_with(arg, non_generic, mapping))
                    .collect(),
            },
        }
    }
}
