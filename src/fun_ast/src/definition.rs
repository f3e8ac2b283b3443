use std::fmt::Display;

use fun_common::location::{Range, Ranged};

use crate::{
    expr_pat::{ExprP, PatternP},
    identifier::NameP,
    types::TypeP,
};

/// A `val` or `fun` declaration, either at the top level of a module or inside a `let`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationP {
    Value(ValueDeclarationP),
    Function(FunctionDeclarationP),
}

/// `val name = body`, or `val name : ty = body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDeclarationP {
    pub val_token: Range,
    pub name: NameP,
    pub ty: Option<TypeP>,
    pub body: ExprP,
}

/// `fun f p1 p2 = e1 | f q1 q2 = e2 | ...`
///
/// Every clause must repeat the same name with the same number of patterns.
/// The parser guarantees there is at least one clause, and that every clause has at least one pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclarationP {
    pub fun_token: Range,
    pub clauses: Vec<FunctionClauseP>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionClauseP {
    pub name: NameP,
    pub patterns: Vec<PatternP>,
    /// An optional annotation on the clause's result, as in `fun f x : int = ...`.
    pub result_type: Option<TypeP>,
    pub body: ExprP,
}

impl Ranged for FunctionClauseP {
    fn range(&self) -> Range {
        self.name.range.union(self.body.range())
    }
}

impl Ranged for DeclarationP {
    fn range(&self) -> Range {
        match self {
            DeclarationP::Value(value) => value.val_token.union(value.body.range()),
            DeclarationP::Function(function) => function
                .clauses
                .iter()
                .fold(function.fun_token, |range, clause| range.union(clause.range())),
        }
    }
}

impl Display for ValueDeclarationP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "val {} : {} = {}", self.name, ty, self.body),
            None => write!(f, "val {} = {}", self.name, self.body),
        }
    }
}

impl Display for FunctionClauseP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for pattern in &self.patterns {
            write!(f, " {}", pattern)?;
        }
        if let Some(ty) = &self.result_type {
            write!(f, " : {}", ty)?;
        }
        write!(f, " = {}", self.body)
    }
}

impl Display for FunctionDeclarationP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fun ")?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i != 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl Display for DeclarationP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationP::Value(value) => write!(f, "{}", value),
            DeclarationP::Function(function) => write!(f, "{}", function),
        }
    }
}
