//! The syntax tree of a Fun module, as handed over by the parser.
//!
//! Types in this crate are suffixed with `P` (for "parsed") to distinguish them from the
//! types produced by later stages. Every identifier starts out unresolved; alpha conversion
//! fills in its unique name in place.
//!
//! Every node implements [std::fmt::Display], printing the tree back in concrete syntax.
//! Resolved names are printed in place of original names, which makes renamed trees easy to
//! compare in tests.

pub mod builder;
pub mod definition;
pub mod expr_pat;
pub mod file;
pub mod identifier;
pub mod types;

pub use definition::{DeclarationP, FunctionClauseP, FunctionDeclarationP, ValueDeclarationP};
pub use expr_pat::{ConstantValue, ExprP, MatchP, Operator, OperatorCategory, OperatorP, PatternP};
pub use file::ModuleP;
pub use identifier::NameP;
pub use types::TypeP;
