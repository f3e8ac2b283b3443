//! Shorthand constructors for syntax trees.
//!
//! Every node built here has an empty range at the start of the file.
//! Use the node types directly when source positions matter.

use fun_common::location::Range;

use crate::{
    definition::{DeclarationP, FunctionClauseP, FunctionDeclarationP, ValueDeclarationP},
    expr_pat::{ConstantValue, ExprP, MatchP, Operator, OperatorP, PatternP},
    file::ModuleP,
    identifier::NameP,
    types::TypeP,
};

pub fn name(name: &str) -> NameP {
    NameP::new(name, Range::default())
}

pub fn constant(value: ConstantValue) -> ExprP {
    ExprP::Constant {
        range: Range::default(),
        value,
    }
}

pub fn unit() -> ExprP {
    constant(ConstantValue::Unit)
}

pub fn boolean(value: bool) -> ExprP {
    constant(ConstantValue::Bool(value))
}

pub fn int(value: i64) -> ExprP {
    constant(ConstantValue::Int(value))
}

pub fn float(value: f64) -> ExprP {
    constant(ConstantValue::Float(value))
}

pub fn string(value: &str) -> ExprP {
    constant(ConstantValue::String(value.to_string()))
}

pub fn character(value: char) -> ExprP {
    constant(ConstantValue::Char(value))
}

pub fn var(n: &str) -> ExprP {
    ExprP::Variable(name(n))
}

pub fn not(expr: ExprP) -> ExprP {
    ExprP::Not {
        not_token: Range::default(),
        expr: Box::new(expr),
    }
}

pub fn negate(expr: ExprP) -> ExprP {
    ExprP::Negate {
        minus_token: Range::default(),
        expr: Box::new(expr),
    }
}

pub fn infix(operator: Operator, left: ExprP, right: ExprP) -> ExprP {
    ExprP::Infix {
        operator: OperatorP {
            operator,
            range: Range::default(),
        },
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn apply(function: ExprP, argument: ExprP) -> ExprP {
    ExprP::Apply(Box::new(function), Box::new(argument))
}

/// `f a b c`, built as `((f a) b) c`.
pub fn apply_all(function: ExprP, arguments: Vec<ExprP>) -> ExprP {
    arguments.into_iter().fold(function, apply)
}

pub fn tuple(elements: Vec<ExprP>) -> ExprP {
    ExprP::Tuple {
        open_bracket: Range::default(),
        close_bracket: Range::default(),
        elements,
    }
}

pub fn sequence(elements: Vec<ExprP>) -> ExprP {
    ExprP::Sequence {
        range: Range::default(),
        elements,
    }
}

pub fn if_then_else(condition: ExprP, then_branch: ExprP, else_branch: ExprP) -> ExprP {
    ExprP::If {
        if_token: Range::default(),
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }
}

pub fn arm(pattern: PatternP, body: ExprP) -> MatchP {
    MatchP { pattern, body }
}

pub fn lambda(matches: Vec<MatchP>) -> ExprP {
    ExprP::Lambda {
        fn_token: Range::default(),
        matches,
    }
}

pub fn let_in(declarations: Vec<DeclarationP>, body: ExprP) -> ExprP {
    ExprP::Let {
        let_token: Range::default(),
        end_token: Range::default(),
        declarations,
        body: Box::new(body),
    }
}

pub fn annotated(expr: ExprP, ty: TypeP) -> ExprP {
    ExprP::Annotated {
        expr: Box::new(expr),
        ty,
    }
}

pub fn pat_var(n: &str) -> PatternP {
    PatternP::Variable(name(n))
}

pub fn pat_const(value: ConstantValue) -> PatternP {
    PatternP::Constant {
        range: Range::default(),
        value,
    }
}

pub fn pat_int(value: i64) -> PatternP {
    pat_const(ConstantValue::Int(value))
}

pub fn pat_bool(value: bool) -> PatternP {
    pat_const(ConstantValue::Bool(value))
}

pub fn val(n: &str, body: ExprP) -> DeclarationP {
    DeclarationP::Value(ValueDeclarationP {
        val_token: Range::default(),
        name: name(n),
        ty: None,
        body,
    })
}

pub fn val_typed(n: &str, ty: TypeP, body: ExprP) -> DeclarationP {
    DeclarationP::Value(ValueDeclarationP {
        val_token: Range::default(),
        name: name(n),
        ty: Some(ty),
        body,
    })
}

pub fn clause(n: &str, patterns: Vec<PatternP>, body: ExprP) -> FunctionClauseP {
    FunctionClauseP {
        name: name(n),
        patterns,
        result_type: None,
        body,
    }
}

pub fn clause_typed(
    n: &str,
    patterns: Vec<PatternP>,
    result_type: TypeP,
    body: ExprP,
) -> FunctionClauseP {
    FunctionClauseP {
        name: name(n),
        patterns,
        result_type: Some(result_type),
        body,
    }
}

pub fn fun(clauses: Vec<FunctionClauseP>) -> DeclarationP {
    DeclarationP::Function(FunctionDeclarationP {
        fun_token: Range::default(),
        clauses,
    })
}

pub fn ty_named(n: &str, args: Vec<TypeP>) -> TypeP {
    TypeP::Named {
        name: name(n),
        args,
    }
}

/// A type variable. `n` should include the leading quote, e.g. `'a`.
pub fn ty_var(n: &str) -> TypeP {
    TypeP::Variable(name(n))
}

pub fn ty_arrow(argument: TypeP, result: TypeP) -> TypeP {
    TypeP::Function(Box::new(argument), Box::new(result))
}

pub fn ty_tuple(elements: Vec<TypeP>) -> TypeP {
    TypeP::Tuple(elements)
}

pub fn module(declarations: Vec<DeclarationP>) -> ModuleP {
    ModuleP { declarations }
}
