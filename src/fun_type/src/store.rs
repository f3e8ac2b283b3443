use crate::{Type, TypeVariableId};

/// Owns every type variable of one compilation unit, and what each has been resolved to.
///
/// This is a union-find structure: each variable's cell either is empty (the variable is the
/// representative of its equivalence class) or links to another type. Variables must never be
/// shared between stores.
#[derive(Debug, Default)]
pub struct TypeStore {
    links: Vec<Option<Type>>,
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new, unresolved type variable. Identifiers are handed out in increasing order.
    pub fn fresh_variable(&mut self) -> Type {
        let id = TypeVariableId(self.links.len() as u32);
        self.links.push(None);
        Type::Variable(id)
    }

    /// The number of variables allocated so far.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// What the variable was directly linked to, if anything. No pruning is performed.
    pub fn link(&self, id: TypeVariableId) -> Option<&Type> {
        self.cell(id).as_ref()
    }

    fn cell(&self, id: TypeVariableId) -> &Option<Type> {
        match self.links.get(id.0 as usize) {
            Some(cell) => cell,
            None => panic!("type variable {} does not belong to this type store", id.0),
        }
    }

    /// Records that the unresolved variable `id` stands for `ty`.
    pub(crate) fn set_link(&mut self, id: TypeVariableId, ty: Type) {
        let cell = &mut self.links[id.0 as usize];
        assert!(
            cell.is_none(),
            "type variable {} was resolved twice; only pruned variables may be linked",
            id.0
        );
        *cell = Some(ty);
    }

    /// Follows the chain of links from `ty` to the representative of its class:
    /// either an unresolved variable or a constructor type.
    ///
    /// Every variable visited on the way is relinked straight to the representative,
    /// so pruning the same type again takes at most one step.
    pub fn prune(&mut self, ty: &Type) -> Type {
        let mut visited = Vec::new();
        let mut current = ty.clone();
        while let Type::Variable(id) = current {
            match self.cell(id) {
                Some(next) => {
                    visited.push(id);
                    current = next.clone();
                }
                None => break,
            }
        }
        for id in visited {
            self.links[id.0 as usize] = Some(current.clone());
        }
        current
    }

    /// Substitutes every resolved variable inside `ty`, all the way down.
    /// The result mentions only unresolved variables.
    pub fn resolve(&mut self, ty: &Type) -> Type {
        match self.prune(ty) {
            Type::Constructor { name, args } => Type::Constructor {
                name,
                args: args.iter().map(|arg| self.resolve(arg)).collect(),
            },
            variable => variable,
        }
    }
}
