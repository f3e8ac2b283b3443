//! A lexically scoped key/value environment.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

/// One level of a chain of lexical scopes.
///
/// A scope borrows its parent, so any number of child scopes may chain to the same parent,
/// and no scope can outlive the syntactic construct (and the recursive call) that created it.
/// Bindings are only ever added to the innermost scope; a parent is never mutated through a child.
#[derive(Debug)]
pub struct Scope<'p, K, V> {
    parent: Option<&'p Scope<'p, K, V>>,
    bindings: HashMap<K, V>,
}

impl<K, V> Default for Scope<'_, K, V> {
    fn default() -> Self {
        Self {
            parent: None,
            bindings: HashMap::new(),
        }
    }
}

impl<'p, K, V> Scope<'p, K, V>
where
    K: Eq + Hash,
{
    /// Creates an outermost scope with no parent.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested inside this one.
    pub fn child(&self) -> Scope<'_, K, V> {
        Scope {
            parent: Some(self),
            bindings: HashMap::new(),
        }
    }

    /// Walks from this scope outwards and returns the first binding of `key`.
    /// Inner bindings shadow outer ones.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.bindings.get(key) {
            Some(value) => Some(value),
            None => self.parent.and_then(|parent| parent.lookup(key)),
        }
    }

    /// Binds `key` in this scope only, replacing any binding of `key` made at this level.
    pub fn bind(&mut self, key: K, value: V) {
        self.bindings.insert(key, value);
    }

    /// Returns whether `key` is bound at this level, ignoring the enclosing scopes.
    pub fn contains_local<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.bindings.contains_key(key)
    }

    /// Returns true if `predicate` holds for any key bound in this scope or an enclosing one.
    pub fn any_key(&self, mut predicate: impl FnMut(&K) -> bool) -> bool {
        if self.bindings.keys().any(&mut predicate) {
            return true;
        }
        match self.parent {
            Some(parent) => parent.any_key(predicate),
            None => false,
        }
    }
}
