use fun_alpha::{alpha_convert, convert, AlphaError};
use fun_ast::{builder::*, DeclarationP, ExprP, FunctionClauseP, FunctionDeclarationP, NameP, Operator, PatternP};
use fun_common::{
    config::FrontEndConfig,
    diagnostic::HelpType,
    location::{Location, Range, SourceFileIdentifier},
};

fn fib_body() -> ExprP {
    infix(
        Operator::Add,
        apply(var("fib"), infix(Operator::Subtract, var("x"), int(1))),
        apply(var("fib"), infix(Operator::Subtract, var("x"), int(2))),
    )
}

#[test]
fn test_transform() {
    let module = module(vec![
        val(
            "a",
            infix(Operator::Multiply, infix(Operator::Add, int(1), int(2)), int(3)),
        ),
        val(
            "a",
            let_in(
                vec![val("x", int(1)), val("y", string("ab"))],
                sequence(vec![infix(Operator::Greater, var("x"), int(0)), int(1)]),
            ),
        ),
        val(
            "a",
            if_then_else(
                infix(Operator::Greater, int(1), int(0)),
                int(1),
                lambda(vec![arm(pat_bool(true), int(1)), arm(pat_var("x"), int(0))]),
            ),
        ),
        fun(vec![
            clause("fib", vec![pat_int(0)], int(0)),
            clause("fib", vec![pat_int(1)], int(1)),
            clause("fib", vec![pat_var("x")], fib_body()),
        ]),
    ]);

    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert!(errors.is_empty(), "{:?}", errors);
    let expected = [
        "val a$1 = (1 + 2) * 3",
        "val a$4 = let val x$2 = 1 val y$3 = \"ab\" in x$2 > 0; 1 end",
        "val a$6 = if 1 > 0 then 1 else fn true => 1 | x$5 => 0",
        "fun fib$7 0 = 0 | fib$7 1 = 1 | fib$7 x$8 = fib$7 (x$8 - 1) + fib$7 (x$8 - 2)",
    ];
    assert_eq!(module.to_string(), expected.join("\n"));
}

#[test]
fn test_value_body_sees_previous_binding() {
    let module = module(vec![val("x", int(1)), val("x", var("x"))]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert!(errors.is_empty());
    assert_eq!(module.to_string(), "val x$1 = 1\nval x$2 = x$1");
}

#[test]
fn test_value_body_cannot_see_itself() {
    let (module, errors) = convert(module(vec![val("x", var("x"))]), &FrontEndConfig::default());
    assert_eq!(
        errors,
        vec![AlphaError::UndefinedVariable {
            name: "x".to_string(),
            range: Range::default()
        }]
    );
    assert_eq!(module.to_string(), "val x$1 = x");
}

#[test]
fn test_undefined_variable() {
    let (_, errors) = convert(
        module(vec![val("a", apply(var("f"), int(1)))]),
        &FrontEndConfig::default(),
    );
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("undefined variable 'f'"));
}

#[test]
fn test_let_declarations_are_ordered() {
    // let val y = z val z = 1 in y end: `z` is not yet visible in the first declaration.
    let block = let_in(vec![val("y", var("z")), val("z", int(1))], var("y"));
    let (module, errors) = convert(module(vec![val("a", block)]), &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        module.to_string(),
        "val a$3 = let val y$1 = z val z$2 = 1 in y$1 end"
    );
}

#[test]
fn test_let_bindings_do_not_escape() {
    let module = module(vec![
        val("a", let_in(vec![val("x", int(1))], var("x"))),
        val("b", var("x")),
    ]);
    let (_, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], AlphaError::UndefinedVariable { name, .. } if name == "x"));
}

#[test]
fn test_lambda_arms_have_separate_scopes() {
    let function = lambda(vec![arm(pat_var("x"), var("x")), arm(pat_var("y"), var("x"))]);
    let (module, errors) = convert(module(vec![val("f", function)]), &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(module.to_string(), "val f$3 = fn x$1 => x$1 | y$2 => x");
}

#[test]
fn test_duplicate_id() {
    let first = Range::new(Location::new(0, 6), Location::new(0, 7));
    let second = Range::new(Location::new(0, 8), Location::new(0, 9));
    let declaration = DeclarationP::Function(FunctionDeclarationP {
        fun_token: Range::default(),
        clauses: vec![FunctionClauseP {
            name: name("f"),
            patterns: vec![
                PatternP::Variable(NameP::new("x", first)),
                PatternP::Variable(NameP::new("x", second)),
            ],
            result_type: None,
            body: int(1),
        }],
    });

    let file = SourceFileIdentifier::root_file("test");
    let result = alpha_convert(&file, module(vec![declaration]), &FrontEndConfig::default());
    assert!(result.succeeded());
    let (module, messages) = result.destructure();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, "duplicate identifier 'x' in pattern");
    assert_eq!(messages[0].diagnostic.range, Some(second));
    assert_eq!(messages[0].help[0].help_type, HelpType::Note);
    assert_eq!(messages[0].help[0].diagnostic.range, Some(first));
    assert_eq!(module.unwrap().to_string(), "fun f$1 x$2 x = 1");
}

#[test]
fn test_consistent_fun_name() {
    let module = module(vec![fun(vec![
        clause("fib", vec![pat_int(1)], int(1)),
        clause("f", vec![pat_var("x")], var("x")),
    ])]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .to_string()
        .contains("function name is not consistent: f"));
    // The clause is still converted, and refers to the function declared by the first clause.
    assert_eq!(module.to_string(), "fun fib$1 1 = 1 | fib$1 x$2 = x$2");
}

#[test]
fn test_consistent_fun_arity() {
    let module = module(vec![fun(vec![
        clause("fib", vec![pat_int(1)], int(1)),
        clause("fib", vec![pat_var("x"), pat_var("y")], var("x")),
    ])]);
    let (_, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(
        errors,
        vec![AlphaError::InconsistentFunctionArity {
            function: "fib".to_string(),
            expected: 1,
            actual: 2,
            range: Range::default(),
        }]
    );
    assert!(errors[0]
        .to_string()
        .starts_with("function arity is not consistent"));
}

#[test]
fn test_clause_parameters_do_not_leak() {
    let module = module(vec![fun(vec![
        clause("f", vec![pat_var("x")], var("x")),
        clause("f", vec![pat_int(0)], var("x")),
    ])]);
    let (_, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], AlphaError::UndefinedVariable { .. }));
}

#[test]
fn test_recursive_reference() {
    let module = module(vec![fun(vec![clause(
        "loop",
        vec![pat_var("n")],
        apply(var("loop"), var("n")),
    )])]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert!(errors.is_empty());
    assert_eq!(module.to_string(), "fun loop$1 n$2 = loop$1 n$2");
}

#[test]
fn test_underscore_var() {
    let module = module(vec![fun(vec![clause("f", vec![pat_var("_")], var("_"))])]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "cannot use the placeholder '_' as a reference"
    );
    // The binding is accepted.
    assert_eq!(module.to_string(), "fun f$1 _$2 = _");
}

#[test]
fn test_underscore_in_pattern() {
    let module = module(vec![
        fun(vec![
            clause("fib", vec![pat_int(1)], int(1)),
            clause("fib", vec![pat_var("_")], int(0)),
        ]),
        val("_", int(0)),
    ]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert!(errors.is_empty());
    assert_eq!(
        module.to_string(),
        "fun fib$1 1 = 1 | fib$1 _$2 = 0\nval _$3 = 0"
    );
}

#[test]
fn test_errors_do_not_stop_conversion() {
    let module = module(vec![
        val("a", var("missing")),
        fun(vec![clause("f", vec![pat_var("x"), pat_var("x")], var("_"))]),
        val("b", var("a")),
    ]);
    let (module, errors) = convert(module, &FrontEndConfig::default());
    assert_eq!(errors.len(), 3);
    assert_eq!(
        module.to_string(),
        "val a$1 = missing\nfun f$2 x$3 x = _\nval b$4 = a$1"
    );
}

#[test]
fn test_configured_names() {
    let config = FrontEndConfig {
        placeholder: "__".to_string(),
        unique_separator: "#".to_string(),
        deny_on_error: true,
    };
    let module = module(vec![val("_", int(1)), val("y", var("__"))]);
    let (module, errors) = convert(module, &config);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        AlphaError::PlaceholderInReferencePosition { .. }
    ));
    assert_eq!(module.to_string(), "val _#1 = 1\nval y#2 = __");
}

#[test]
fn test_resolved_names_are_unique() {
    fn collect_bindings(expr: &ExprP, names: &mut Vec<String>) {
        match expr {
            ExprP::Lambda { matches, .. } => {
                for arm in matches {
                    if let PatternP::Variable(name) = &arm.pattern {
                        names.push(name.resolved().unwrap().to_string());
                    }
                    collect_bindings(&arm.body, names);
                }
            }
            ExprP::Let {
                declarations, body, ..
            } => {
                for declaration in declarations {
                    if let DeclarationP::Value(value) = declaration {
                        names.push(value.name.resolved().unwrap().to_string());
                        collect_bindings(&value.body, names);
                    }
                }
                collect_bindings(body, names);
            }
            _ => {}
        }
    }

    let shadowing = lambda(vec![arm(
        pat_var("x"),
        let_in(
            vec![val("x", var("x")), val("x", var("x"))],
            lambda(vec![arm(pat_var("x"), var("x"))]),
        ),
    )]);
    let (module, errors) = convert(module(vec![val("x", shadowing)]), &FrontEndConfig::default());
    assert!(errors.is_empty());

    let mut names = Vec::new();
    if let DeclarationP::Value(value) = &module.declarations[0] {
        collect_bindings(&value.body, &mut names);
        names.push(value.name.resolved().unwrap().to_string());
    }
    assert_eq!(names, vec!["x$1", "x$2", "x$3", "x$4", "x$5"]);
}
