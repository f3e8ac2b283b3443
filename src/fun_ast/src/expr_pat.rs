use std::fmt::Display;

use fun_common::location::{Range, Ranged};

use crate::{definition::DeclarationP, identifier::NameP, types::TypeP};

#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Char(char),
}

impl Display for ConstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstantValue::Unit => write!(f, "()"),
            ConstantValue::Bool(value) => write!(f, "{}", value),
            ConstantValue::Int(value) => write!(f, "{}", value),
            ConstantValue::Float(value) => write!(f, "{:?}", value),
            // Quotes and backslashes are escaped, so the text reads back as the same value.
            ConstantValue::String(value) => write!(f, "{:?}", value),
            ConstantValue::Char(value) => {
                let mut buffer = [0; 4];
                write!(f, "#{:?}", &*value.encode_utf8(&mut buffer))
            }
        }
    }
}

/// A pattern on the left of a `=>` or in the parameter list of a function clause.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternP {
    /// Matches exactly one constant value.
    Constant { range: Range, value: ConstantValue },
    /// Matches anything, and binds it to a new name.
    Variable(NameP),
}

impl Ranged for PatternP {
    fn range(&self) -> Range {
        match self {
            PatternP::Constant { range, .. } => *range,
            PatternP::Variable(name) => name.range,
        }
    }
}

impl Display for PatternP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternP::Constant { value, .. } => write!(f, "{}", value),
            PatternP::Variable(name) => write!(f, "{}", name),
        }
    }
}

/// The built-in infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

/// Operators of one category place the same requirements on their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    /// Numeric operands, and a result of the same type.
    Arithmetic,
    /// Numeric operands, and a `bool` result.
    Comparison,
    /// `bool` operands and result.
    Logical,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "*" => Operator::Multiply,
            "/" => Operator::Divide,
            "%" => Operator::Modulo,
            "=" => Operator::Equal,
            "<>" => Operator::NotEqual,
            "<" => Operator::Less,
            "<=" => Operator::LessEqual,
            ">" => Operator::Greater,
            ">=" => Operator::GreaterEqual,
            "&&" => Operator::And,
            "||" => Operator::Or,
            _ => return None,
        })
    }

    pub fn category(self) -> OperatorCategory {
        match self {
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Modulo => OperatorCategory::Arithmetic,
            Operator::Equal
            | Operator::NotEqual
            | Operator::Less
            | Operator::LessEqual
            | Operator::Greater
            | Operator::GreaterEqual => OperatorCategory::Comparison,
            Operator::And | Operator::Or => OperatorCategory::Logical,
        }
    }

    /// Lower numbers bind more tightly. All binary operators are left associative.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Multiply | Operator::Divide | Operator::Modulo => 4,
            Operator::Add | Operator::Subtract => 5,
            Operator::Equal
            | Operator::NotEqual
            | Operator::Less
            | Operator::LessEqual
            | Operator::Greater
            | Operator::GreaterEqual => 6,
            Operator::And | Operator::Or => 7,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorP {
    pub operator: Operator,
    pub range: Range,
}

/// One `pattern => body` arm of a lambda.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchP {
    pub pattern: PatternP,
    pub body: ExprP,
}

impl Display for MatchP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.pattern, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprP {
    /// A literal such as `14`, `1.5`, `"abc"` or `()`.
    Constant { range: Range, value: ConstantValue },
    /// A reference to a value bound elsewhere.
    Variable(NameP),
    /// `not expr`
    Not { not_token: Range, expr: Box<ExprP> },
    /// `-expr`
    Negate { minus_token: Range, expr: Box<ExprP> },
    /// `left op right`
    Infix {
        operator: OperatorP,
        left: Box<ExprP>,
        right: Box<ExprP>,
    },
    /// `(a, b, ...)` with at least two elements.
    Tuple {
        open_bracket: Range,
        close_bracket: Range,
        elements: Vec<ExprP>,
    },
    /// `a; b; ...`, evaluating to the last element.
    /// An empty sequence evaluates to `()`.
    Sequence { range: Range, elements: Vec<ExprP> },
    /// `if condition then then_branch else else_branch`
    If {
        if_token: Range,
        condition: Box<ExprP>,
        then_branch: Box<ExprP>,
        else_branch: Box<ExprP>,
    },
    /// `fn pat => expr | pat => expr | ...`
    Lambda { fn_token: Range, matches: Vec<MatchP> },
    /// Apply the left hand side to the right hand side, e.g. `f x`.
    /// `f x y` is represented as `(f x) y`.
    Apply(Box<ExprP>, Box<ExprP>),
    /// `let decls in body end`
    Let {
        let_token: Range,
        end_token: Range,
        declarations: Vec<DeclarationP>,
        body: Box<ExprP>,
    },
    /// `expr : ty`
    Annotated { expr: Box<ExprP>, ty: TypeP },
}

impl ExprP {
    /// The precedence of the root of this expression. Lower numbers bind more tightly;
    /// expressions with precedence 1 never need brackets.
    pub fn precedence(&self) -> u8 {
        match self {
            ExprP::Constant { .. } | ExprP::Variable(_) | ExprP::Tuple { .. } | ExprP::Let { .. } => 1,
            ExprP::Sequence { elements, .. } if elements.is_empty() => 1,
            ExprP::Not { .. } | ExprP::Negate { .. } => 2,
            ExprP::Apply(..) => 3,
            ExprP::Infix { operator, .. } => operator.operator.precedence(),
            ExprP::If { .. } => 8,
            ExprP::Lambda { .. } => 9,
            ExprP::Sequence { .. } | ExprP::Annotated { .. } => 10,
        }
    }

    /// Prints `child` as an operand of an expression with the given precedence.
    /// If `strict` is set, a child of equal precedence is bracketed too,
    /// which is needed on the right of a left associative operator.
    fn fmt_operand(
        f: &mut std::fmt::Formatter<'_>,
        parent: u8,
        child: &ExprP,
        strict: bool,
    ) -> std::fmt::Result {
        let child_precedence = child.precedence();
        if child_precedence > parent || (strict && child_precedence == parent) {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl Display for ExprP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precedence = self.precedence();
        match self {
            ExprP::Constant { value, .. } => write!(f, "{}", value),
            ExprP::Variable(name) => write!(f, "{}", name),
            ExprP::Not { expr, .. } => {
                write!(f, "not ")?;
                Self::fmt_operand(f, precedence, expr, false)
            }
            ExprP::Negate { expr, .. } => {
                write!(f, "-")?;
                Self::fmt_operand(f, precedence, expr, false)
            }
            ExprP::Infix {
                operator,
                left,
                right,
            } => {
                Self::fmt_operand(f, precedence, left, false)?;
                write!(f, " {} ", operator.operator)?;
                Self::fmt_operand(f, precedence, right, true)
            }
            ExprP::Tuple { elements, .. } => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
            ExprP::Sequence { elements, .. } if elements.is_empty() => write!(f, "()"),
            ExprP::Sequence { elements, .. } => {
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        write!(f, "; ")?;
                    }
                    Self::fmt_operand(f, precedence, element, false)?;
                }
                Ok(())
            }
            ExprP::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => write!(
                f,
                "if {} then {} else {}",
                condition, then_branch, else_branch
            ),
            ExprP::Lambda { matches, .. } => {
                write!(f, "fn ")?;
                for (i, arm) in matches.iter().enumerate() {
                    if i != 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", arm)?;
                }
                Ok(())
            }
            ExprP::Apply(function, argument) => {
                Self::fmt_operand(f, precedence, function, false)?;
                write!(f, " ")?;
                // Only atoms may be written as arguments without brackets.
                Self::fmt_operand(f, 1, argument, false)
            }
            ExprP::Let {
                declarations, body, ..
            } => {
                write!(f, "let ")?;
                for declaration in declarations {
                    write!(f, "{} ", declaration)?;
                }
                write!(f, "in {} end", body)
            }
            ExprP::Annotated { expr, ty } => {
                Self::fmt_operand(f, precedence, expr, false)?;
                write!(f, " : {}", ty)
            }
        }
    }
}

impl Ranged for ExprP {
    fn range(&self) -> Range {
        match self {
            ExprP::Constant { range, .. } => *range,
            ExprP::Variable(name) => name.range,
            ExprP::Not { not_token, expr } => not_token.union(expr.range()),
            ExprP::Negate { minus_token, expr } => minus_token.union(expr.range()),
            ExprP::Infix {
                operator,
                left,
                right,
            } => left.range().union(operator.range).union(right.range()),
            ExprP::Tuple {
                open_bracket,
                close_bracket,
                ..
            } => open_bracket.union(*close_bracket),
            ExprP::Sequence { range, .. } => *range,
            ExprP::If {
                if_token,
                else_branch,
                ..
            } => if_token.union(else_branch.range()),
            ExprP::Lambda { fn_token, matches } => matches
                .iter()
                .fold(*fn_token, |range, arm| range.union(arm.body.range())),
            ExprP::Apply(function, argument) => function.range().union(argument.range()),
            ExprP::Let {
                let_token,
                end_token,
                ..
            } => let_token.union(*end_token),
            ExprP::Annotated { expr, ty } => expr.range().union(ty.range()),
        }
    }
}
