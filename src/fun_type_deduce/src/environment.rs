use std::fmt::Display;

use fun_type::{Type, TypeStore};

/// Maps resolved names to their types, in the order the names were bound.
///
/// Entries are never removed. Binding a name twice keeps both entries, and lookups find the
/// most recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnvironment {
    entries: Vec<(String, Type)>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: Type) {
        self.entries.push((name.into(), ty));
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.entries
            .iter()
            .rev()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, ty)| ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.entries.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every type with what it currently stands for in `store`.
    pub(crate) fn resolve_all(&mut self, store: &mut TypeStore) {
        for (_, ty) in &mut self.entries {
            *ty = store.resolve(ty);
        }
    }
}

impl Display for TypeEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, ty)) in self.entries.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "val {} : {}", name, ty)?;
        }
        Ok(())
    }
}
