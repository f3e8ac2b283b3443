use fun_ast::{builder::*, ConstantValue, Operator};
use fun_common::location::{Range, Ranged};

#[test]
fn test_print_infix_precedence() {
    let product = infix(
        Operator::Multiply,
        infix(Operator::Add, int(1), int(2)),
        int(3),
    );
    assert_eq!(module(vec![val("a", product)]).to_string(), "val a = (1 + 2) * 3");

    let left_nested = infix(
        Operator::Subtract,
        infix(Operator::Subtract, var("a"), var("b")),
        var("c"),
    );
    assert_eq!(left_nested.to_string(), "a - b - c");

    let right_nested = infix(
        Operator::Subtract,
        var("a"),
        infix(Operator::Subtract, var("b"), var("c")),
    );
    assert_eq!(right_nested.to_string(), "a - (b - c)");
}

#[test]
fn test_print_application() {
    let recursive = infix(
        Operator::Add,
        apply(var("fib"), infix(Operator::Subtract, var("x"), int(1))),
        apply(var("fib"), infix(Operator::Subtract, var("x"), int(2))),
    );
    assert_eq!(recursive.to_string(), "fib (x - 1) + fib (x - 2)");

    let curried = apply_all(var("f"), vec![var("a"), apply(var("g"), var("b"))]);
    assert_eq!(curried.to_string(), "f a (g b)");

    let immediate = apply_all(
        lambda(vec![arm(pat_var("x"), var("x"))]),
        vec![negate(float(1.5))],
    );
    assert_eq!(immediate.to_string(), "(fn x => x) (-1.5)");
}

#[test]
fn test_print_unary() {
    let condition = infix(
        Operator::And,
        not(infix(Operator::Greater, var("a"), int(0))),
        boolean(false),
    );
    assert_eq!(condition.to_string(), "not (a > 0) && false");
    assert_eq!(negate(float(1.2)).to_string(), "-1.2");
}

#[test]
fn test_print_compound_expressions() {
    let block = let_in(
        vec![val("x", int(1)), val("y", string("ab"))],
        sequence(vec![infix(Operator::Greater, var("x"), int(0)), int(1)]),
    );
    assert_eq!(
        block.to_string(),
        "let val x = 1 val y = \"ab\" in x > 0; 1 end"
    );

    let conditional = if_then_else(
        infix(Operator::Greater, int(1), int(0)),
        int(1),
        lambda(vec![arm(pat_bool(true), int(1)), arm(pat_var("x"), int(0))]),
    );
    assert_eq!(
        conditional.to_string(),
        "if 1 > 0 then 1 else fn true => 1 | x => 0"
    );

    let pair = tuple(vec![unit(), character('c')]);
    assert_eq!(pair.to_string(), "((), #\"c\")");

    let typed = annotated(var("x"), ty_named("int", vec![]));
    assert_eq!(apply(var("f"), typed).to_string(), "f (x : int)");
}

#[test]
fn test_print_function_declaration() {
    let declaration = fun(vec![
        clause("fib", vec![pat_int(0)], int(0)),
        clause("fib", vec![pat_int(1)], int(1)),
        clause(
            "fib",
            vec![pat_var("x")],
            infix(
                Operator::Add,
                apply(var("fib"), infix(Operator::Subtract, var("x"), int(1))),
                apply(var("fib"), infix(Operator::Subtract, var("x"), int(2))),
            ),
        ),
    ]);
    assert_eq!(
        declaration.to_string(),
        "fun fib 0 = 0 | fib 1 = 1 | fib x = fib (x - 1) + fib (x - 2)"
    );

    let typed = fun(vec![clause_typed(
        "f",
        vec![pat_const(ConstantValue::String("s".to_string()))],
        ty_named("int", vec![]),
        int(1),
    )]);
    assert_eq!(typed.to_string(), "fun f \"s\" : int = 1");
}

#[test]
fn test_print_type_annotations() {
    let int_ty = || ty_named("int", vec![]);
    let higher_order = ty_arrow(ty_arrow(int_ty(), int_ty()), ty_var("'a"));
    assert_eq!(higher_order.to_string(), "(int -> int) -> 'a");

    let pair = ty_tuple(vec![
        ty_arrow(int_ty(), int_ty()),
        ty_named("list", vec![int_ty()]),
    ]);
    assert_eq!(pair.to_string(), "(int -> int) * int list");

    let declaration = val_typed(
        "p",
        ty_tuple(vec![int_ty(), int_ty()]),
        tuple(vec![int(1), int(2)]),
    );
    assert_eq!(declaration.to_string(), "val p : int * int = (1, 2)");
}

#[test]
fn test_module_prints_one_declaration_per_line() {
    let printed = module(vec![val("a", int(1)), val("b", var("a"))]).to_string();
    assert_eq!(printed, "val a = 1\nval b = a");
}

#[test]
fn test_print_escapes_text() {
    assert_eq!(string("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
    assert_eq!(string("a\\b").to_string(), "\"a\\\\b\"");
    assert_eq!(character('"').to_string(), "#\"\\\"\"");
    assert_eq!(character('c').to_string(), "#\"c\"");
}

#[test]
fn test_empty_sequences_and_tuples() {
    let empty = sequence(vec![]);
    assert_eq!(empty.to_string(), "()");
    assert_eq!(empty.range(), Range::default());
    assert_eq!(apply(var("f"), empty).to_string(), "f ()");
    assert_eq!(ty_tuple(vec![]).range(), Range::default());
}
