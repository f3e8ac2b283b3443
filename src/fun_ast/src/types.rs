use std::fmt::Display;

use fun_common::location::{Range, Ranged};

use crate::identifier::NameP;

/// A type annotation as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeP {
    /// A named type, possibly applied to arguments, e.g. `int` or `int list`.
    Named { name: NameP, args: Vec<TypeP> },
    /// A type variable such as `'a`. The name includes the leading quote.
    Variable(NameP),
    /// A function `a -> b`.
    /// Functions with more arguments, e.g. `a -> b -> c` are represented as
    /// curried functions, e.g. `a -> (b -> c)`.
    Function(Box<TypeP>, Box<TypeP>),
    /// `a * b * ...` with at least two elements.
    Tuple(Vec<TypeP>),
}

impl TypeP {
    fn needs_brackets(&self) -> bool {
        matches!(self, TypeP::Function(..) | TypeP::Tuple(_))
    }
}

impl Ranged for TypeP {
    fn range(&self) -> Range {
        match self {
            TypeP::Named { name, args } => args
                .iter()
                .fold(name.range, |acc, arg| acc.union(arg.range())),
            TypeP::Variable(name) => name.range,
            TypeP::Function(left, right) => left.range().union(right.range()),
            TypeP::Tuple(elements) => elements
                .iter()
                .map(|element| element.range())
                .reduce(Range::union)
                .unwrap_or_default(),
        }
    }
}

impl Display for TypeP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeP::Named { name, args } => match args.len() {
                0 => write!(f, "{}", name.name),
                1 if !args[0].needs_brackets() => write!(f, "{} {}", args[0], name.name),
                _ => {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i != 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ") {}", name.name)
                }
            },
            TypeP::Variable(name) => write!(f, "{}", name.name),
            TypeP::Function(left, right) => {
                if matches!(**left, TypeP::Function(..)) {
                    write!(f, "({}) -> {}", left, right)
                } else {
                    write!(f, "{} -> {}", left, right)
                }
            }
            TypeP::Tuple(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        write!(f, " * ")?;
                    }
                    if element.needs_brackets() {
                        write!(f, "({})", element)?;
                    } else {
                        write!(f, "{}", element)?;
                    }
                }
                Ok(())
            }
        }
    }
}
