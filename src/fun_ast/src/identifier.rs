use std::fmt::Display;

use fun_common::location::{Range, Ranged};

/// A name written in the source, e.g. the `x` in `fn x => x`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameP {
    /// The name as it was written in the source.
    pub name: String,
    pub range: Range,
    /// The unique name this identifier refers to, filled in by alpha conversion.
    /// Names that could not be resolved (e.g. undefined variables) are left as `None`.
    resolved: Option<String>,
}

impl NameP {
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
            resolved: None,
        }
    }

    pub fn resolved(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// Records the unique name this identifier refers to.
    ///
    /// # Panics
    /// A name is resolved at most once, so this panics if it was already resolved.
    pub fn resolve(&mut self, unique_name: String) {
        if let Some(existing) = &self.resolved {
            panic!(
                "identifier '{}' was already resolved to '{}' and cannot be resolved to '{}'",
                self.name, existing, unique_name
            );
        }
        self.resolved = Some(unique_name);
    }

    /// The resolved name if there is one, otherwise the original name.
    pub fn key(&self) -> &str {
        self.resolved.as_deref().unwrap_or(&self.name)
    }
}

impl Ranged for NameP {
    fn range(&self) -> Range {
        self.range
    }
}

impl Display for NameP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_resolved_name() {
        let mut name = NameP::new("x", Range::default());
        assert_eq!(name.to_string(), "x");
        name.resolve("x$1".to_string());
        assert_eq!(name.to_string(), "x$1");
        assert_eq!(name.name, "x");
    }

    #[test]
    #[should_panic]
    fn cannot_resolve_twice() {
        let mut name = NameP::new("x", Range::default());
        name.resolve("x$1".to_string());
        name.resolve("x$2".to_string());
    }
}
