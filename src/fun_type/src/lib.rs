//! Types of Fun values, and the machinery to solve equations between them.
//!
//! A [Type] is either a type variable or an application of a type constructor.
//! Type variables are only ever handles into a [TypeStore]; the store records what each
//! variable has been resolved to, so unifying one occurrence of a variable resolves all of them.

use std::fmt::{Debug, Display};

mod instance;
mod store;
mod unify;

pub use instance::NonGenericVariables;
pub use store::TypeStore;
pub use unify::UnificationError;

/// The name of the function type constructor `a -> b`.
pub const ARROW: &str = "->";
/// The name of the tuple type constructor `a * b * ...`.
pub const TUPLE: &str = "*";

/// Identifies a type variable inside the [TypeStore] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeVariableId(pub u32);

impl Display for TypeVariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Variables are named 'a through 'z, then 'a1 through 'z1, and so on.
        let letter = (b'a' + (self.0 % 26) as u8) as char;
        let suffix = self.0 / 26;
        if suffix > 0 {
            write!(f, "'{}{}", letter, suffix)
        } else {
            write!(f, "'{}", letter)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// An unknown type. What it stands for is recorded in the [TypeStore].
    Variable(TypeVariableId),
    /// A type constructor applied to zero or more arguments, e.g. `int`, `int -> bool` or `int * char`.
    Constructor { name: String, args: Vec<Type> },
}

/// The types built in to the core of the language. Each is a constructor with no arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveType {
    Unit,
    Bool,
    Int,
    Float,
    String,
    Char,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Unit => "unit",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::String => "string",
            PrimitiveType::Char => "char",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "unit" => PrimitiveType::Unit,
            "bool" => PrimitiveType::Bool,
            "int" => PrimitiveType::Int,
            "float" => PrimitiveType::Float,
            "string" => PrimitiveType::String,
            "char" => PrimitiveType::Char,
            _ => return None,
        })
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<PrimitiveType> for Type {
    fn from(primitive: PrimitiveType) -> Self {
        Type::Constructor {
            name: primitive.name().to_string(),
            args: Vec::new(),
        }
    }
}

impl Type {
    pub fn unit() -> Type {
        PrimitiveType::Unit.into()
    }

    pub fn bool() -> Type {
        PrimitiveType::Bool.into()
    }

    pub fn int() -> Type {
        PrimitiveType::Int.into()
    }

    pub fn float() -> Type {
        PrimitiveType::Float.into()
    }

    pub fn string() -> Type {
        PrimitiveType::String.into()
    }

    pub fn char() -> Type {
        PrimitiveType::Char.into()
    }

    /// The function type `argument -> result`.
    pub fn arrow(argument: Type, result: Type) -> Type {
        Type::Constructor {
            name: ARROW.to_string(),
            args: vec![argument, result],
        }
    }

    /// The curried function type `a1 -> (a2 -> ... -> result)`.
    pub fn curried(arguments: impl DoubleEndedIterator<Item = Type>, result: Type) -> Type {
        arguments.rev().fold(result, |acc, argument| Type::arrow(argument, acc))
    }

    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Constructor {
            name: TUPLE.to_string(),
            args: elements,
        }
    }

    /// Returns true if this type is a constructor written between its two arguments.
    fn is_infix(&self) -> bool {
        matches!(self, Type::Constructor { name, args } if (name == ARROW && args.len() == 2) || (name == TUPLE && args.len() >= 2))
    }

    /// If `parenthesise` is true, the type is wrapped in brackets.
    /// Note that this prints variables by their identifiers, so to see what a variable
    /// currently stands for, first call [TypeStore::resolve].
    pub fn fmt_proper(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        parenthesise: bool,
    ) -> std::fmt::Result {
        if parenthesise {
            write!(f, "(")?;
        }
        match self {
            Type::Variable(id) => write!(f, "{}", id)?,
            Type::Constructor { name, args } if name == ARROW && args.len() == 2 => {
                let left = &args[0];
                left.fmt_proper(f, matches!(left, Type::Constructor { name, .. } if name == ARROW))?;
                write!(f, " -> ")?;
                args[1].fmt_proper(f, false)?;
            }
            Type::Constructor { name, args } if name == TUPLE && args.len() >= 2 => {
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        write!(f, " * ")?;
                    }
                    arg.fmt_proper(f, arg.is_infix())?;
                }
            }
            Type::Constructor { name, args } => match args.len() {
                0 => write!(f, "{}", name)?,
                1 => {
                    args[0].fmt_proper(f, args[0].is_infix())?;
                    write!(f, " {}", name)?;
                }
                _ => {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i != 0 {
                            write!(f, ", ")?;
                        }
                        arg.fmt_proper(f, false)?;
                    }
                    write!(f, ") {}", name)?;
                }
            },
        };
        if parenthesise {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_proper(f, false)
    }
}
