use monkey_ast::ast::{Expression, Program, Statement};
use monkey_parse::parse_source;

fn parse_ok(src: &str) -> Program {
    let (program, errors) = parse_source(src);
    assert!(errors.is_empty(), "unexpected parser errors: {errors:?}");
    program
}

fn single_expr(src: &str) -> Expression {
    let program = parse_ok(src);
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Expr(e) => e.clone(),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn let_statements() {
    let program = parse_ok("let x = 5; let y = true; let foobar = y;");
    assert_eq!(program.statements.len(), 3);
    let expected = [
        ("x", Expression::Integer(5)),
        ("y", Expression::Boolean(true)),
        ("foobar", Expression::Identifier("y".to_string())),
    ];
    for (stmt, (name, value)) in program.statements.iter().zip(expected) {
        assert_eq!(
            stmt,
            &Statement::Let {
                name: name.to_string(),
                value,
            }
        );
    }
}

#[test]
fn return_statements() {
    let program = parse_ok("return 5; return true; return foobar;");
    assert_eq!(program.statements.len(), 3);
    for stmt in &program.statements {
        assert!(matches!(stmt, Statement::Return { value: Some(_) }));
    }
}

#[test]
fn trailing_semicolon_is_optional() {
    let program = parse_ok("let x = 5");
    assert_eq!(program.statements.len(), 1);
    assert_eq!(single_expr("x + y"), single_expr("x + y;"));
}

#[test]
fn if_expression_without_alternative() {
    let e = single_expr("if (x < y) { x }");
    let Expression::If {
        condition,
        consequence,
        alternative,
    } = e
    else {
        panic!("expected if expression");
    };
    assert_eq!(condition.to_string(), "(x < y)");
    assert_eq!(consequence.statements.len(), 1);
    assert_eq!(
        consequence.statements[0],
        Statement::Expr(Expression::Identifier("x".to_string()))
    );
    assert!(alternative.is_none());
}

#[test]
fn if_expression_with_alternative() {
    let e = single_expr("if (x < y) { x } else { y }");
    let Expression::If { alternative, .. } = e else {
        panic!("expected if expression");
    };
    let alt = alternative.expect("alternative block");
    assert_eq!(
        alt.statements[0],
        Statement::Expr(Expression::Identifier("y".to_string()))
    );
}

#[test]
fn function_literal_with_body() {
    let e = single_expr("fn(x, y) { x + y; }");
    let Expression::Function { parameters, body } = e else {
        panic!("expected function literal");
    };
    assert_eq!(parameters, ["x", "y"]);
    assert_eq!(body.statements.len(), 1);
    assert_eq!(body.statements[0].to_string(), "(x + y)");
}

#[test]
fn function_parameter_lists() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];
    for (src, expected) in cases {
        let Expression::Function { parameters, .. } = single_expr(src) else {
            panic!("expected function literal for {src:?}");
        };
        assert_eq!(parameters, expected, "input {src:?}");
    }
}

#[test]
fn macro_literal() {
    let e = single_expr("macro(x, y) { x + y; }");
    let Expression::Macro { parameters, body } = e else {
        panic!("expected macro literal");
    };
    assert_eq!(parameters, ["x", "y"]);
    assert_eq!(body.statements[0].to_string(), "(x + y)");
}

#[test]
fn call_expression() {
    let e = single_expr("add(1, 2 * 3, 4 + 5);");
    let Expression::Call {
        function,
        arguments,
    } = e
    else {
        panic!("expected call expression");
    };
    assert_eq!(*function, Expression::Identifier("add".to_string()));
    assert_eq!(arguments.len(), 3);
    assert_eq!(arguments[0], Expression::Integer(1));
    assert_eq!(arguments[1].to_string(), "(2 * 3)");
    assert_eq!(arguments[2].to_string(), "(4 + 5)");
}

#[test]
fn call_with_no_arguments() {
    let e = single_expr("noop()");
    let Expression::Call { arguments, .. } = e else {
        panic!("expected call expression");
    };
    assert!(arguments.is_empty());
}

#[test]
fn index_expression() {
    let e = single_expr("myArray[1 + 1]");
    let Expression::Index { left, index } = e else {
        panic!("expected index expression");
    };
    assert_eq!(*left, Expression::Identifier("myArray".to_string()));
    assert_eq!(index.to_string(), "(1 + 1)");
}

#[test]
fn immediately_invoked_function() {
    let e = single_expr("fn(x) { x; }(5)");
    let Expression::Call {
        function,
        arguments,
    } = e
    else {
        panic!("expected call expression");
    };
    assert!(matches!(*function, Expression::Function { .. }));
    assert_eq!(arguments, vec![Expression::Integer(5)]);
}
