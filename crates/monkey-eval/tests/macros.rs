//! quote/unquote and the two macro passes.

use monkey_eval::{define_macros, Environment, Evaluator, Object};
use monkey_parse::parse_source;

fn parse_ok(src: &str) -> monkey_ast::ast::Program {
    let (program, errors) = parse_source(src);
    assert!(errors.is_empty(), "parser errors in {src:?}: {errors:?}");
    program
}

fn eval_value(src: &str) -> Object {
    let program = parse_ok(src);
    let env = Environment::new();
    let mut sink = Vec::new();
    Evaluator::new(&mut sink)
        .eval_program(&program, &env)
        .unwrap_or_else(|| panic!("{src:?} produced no value"))
}

fn run_value(src: &str) -> Object {
    let program = parse_ok(src);
    let env = Environment::new();
    let macro_env = Environment::new();
    let mut sink = Vec::new();
    monkey_eval::run(program, &env, &macro_env, &mut sink)
        .unwrap_or_else(|| panic!("{src:?} produced no value"))
}

fn quoted(src: &str) -> String {
    match eval_value(src) {
        Object::Quote(node) => node.to_string(),
        other => panic!("{src:?} evaluated to {other:?}, expected a quote"),
    }
}

#[test]
fn quote_captures_the_argument_ast() {
    let cases = [
        ("quote(5)", "5"),
        ("quote(5 + 8)", "(5 + 8)"),
        ("quote(foobar)", "foobar"),
        ("quote(foobar + barfoo)", "(foobar + barfoo)"),
        // the argument is never evaluated
        ("let foobar = 8; quote(foobar)", "foobar"),
    ];
    for (src, expected) in cases {
        assert_eq!(quoted(src), expected, "input {src:?}");
    }
}

#[test]
fn unquote_splices_evaluated_values() {
    let cases = [
        ("quote(unquote(4))", "4"),
        ("quote(unquote(4 + 4))", "8"),
        ("quote(8 + unquote(4 + 4))", "(8 + 8)"),
        ("quote(unquote(4 + 4) + 8)", "(8 + 8)"),
        ("let foobar = 8; quote(unquote(foobar))", "8"),
        ("quote(unquote(true))", "true"),
        ("quote(unquote(true == false))", "false"),
        ("quote(unquote(\"hi\"))", "\"hi\""),
        ("quote(unquote(quote(4 + 4)))", "(4 + 4)"),
        (
            "let quotedInfixExpression = quote(4 + 4);\n\
             quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
            "(8 + (4 + 4))",
        ),
    ];
    for (src, expected) in cases {
        assert_eq!(quoted(src), expected, "input {src:?}");
    }
}

#[test]
fn quote_inspect_wraps_the_node() {
    assert_eq!(eval_value("quote(5 + 8)").to_string(), "QUOTE((5 + 8))");
}

#[test]
fn quote_requires_exactly_one_argument() {
    assert_eq!(
        eval_value("quote(1, 2)"),
        Object::Error("wrong number of arguments in quote. got=2, want=1".to_string())
    );
}

#[test]
fn unquote_of_non_representable_objects_is_an_error() {
    assert_eq!(
        eval_value("quote(unquote([1]))"),
        Object::Error("unquote: cannot represent ARRAY as an expression".to_string())
    );
    assert_eq!(
        eval_value("quote(unquote(fn(x) { x }))"),
        Object::Error("unquote: cannot represent FUNCTION as an expression".to_string())
    );
}

#[test]
fn define_macros_extracts_only_macro_lets() {
    let mut program = parse_ok(
        "let number = 1;\n\
         let function = fn(x, y) { x + y };\n\
         let mymacro = macro(x, y) { x + y; };",
    );
    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);

    assert_eq!(program.statements.len(), 2);
    assert!(macro_env.borrow().get("number").is_none());
    assert!(macro_env.borrow().get("function").is_none());

    let Some(Object::Macro {
        parameters, body, ..
    }) = macro_env.borrow().get("mymacro")
    else {
        panic!("mymacro is not bound to a macro object");
    };
    assert_eq!(parameters, ["x", "y"]);
    assert_eq!(body.to_string(), "(x + y)");
}

#[test]
fn expand_macros_splices_quoted_bodies() {
    let cases = [
        (
            "let infixExpression = macro() { quote(1 + 2); }; infixExpression();",
            "(1 + 2)",
        ),
        (
            "let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); }; reverse(2 + 2, 10 - 5);",
            "((10 - 5) - (2 + 2))",
        ),
    ];
    for (src, expected) in cases {
        let mut program = parse_ok(src);
        let macro_env = Environment::new();
        define_macros(&mut program, &macro_env);
        let mut sink = Vec::new();
        let expanded = Evaluator::new(&mut sink)
            .expand_macros(program, &macro_env)
            .expect("expansion succeeds");
        assert_eq!(expanded.to_string(), expected, "input {src:?}");
    }
}

#[test]
fn unless_macro_expands_to_an_if() {
    let src = "let unless = macro(condition, consequence, alternative) {\n\
                   quote(if (!(unquote(condition))) {\n\
                       unquote(consequence);\n\
                   } else {\n\
                       unquote(alternative);\n\
                   });\n\
               };\n\
               unless(10 > 5, puts(\"not greater\"), puts(\"greater\"));";
    let mut program = parse_ok(src);
    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);
    let mut sink = Vec::new();
    let expanded = Evaluator::new(&mut sink)
        .expand_macros(program, &macro_env)
        .expect("expansion succeeds");
    assert_eq!(
        expanded.to_string(),
        "if ((!(10 > 5))) { puts(\"not greater\") } else { puts(\"greater\") }"
    );
}

#[test]
fn macro_arguments_are_substituted_as_ast_not_values() {
    // 5 - 10, not -(5) or -(10): the textbook hygiene check
    assert_eq!(
        run_value("let m = macro(x, y) { quote(unquote(x) - unquote(y)) }; m(5, 10);"),
        Object::Integer(-5)
    );
    // argument expressions are re-evaluated where they are spliced
    assert_eq!(
        run_value(
            "let double = macro(e) { quote(unquote(e) + unquote(e)) }; double(2 * 3);"
        ),
        Object::Integer(12)
    );
}

#[test]
fn macro_arity_is_validated_at_expansion() {
    assert_eq!(
        run_value("let m = macro(x, y) { quote(unquote(x)) }; m(1);"),
        Object::Error(
            "wrong number of arguments in macro expansion. got=1, want=2".to_string()
        )
    );
}

#[test]
fn non_quote_macro_results_leave_the_call_unchanged() {
    // the macro body evaluates to an integer, so the call stays put and
    // fails at evaluation time the way any unknown identifier does
    assert_eq!(
        run_value("let m = macro() { 1 }; m();"),
        Object::Error("identifier not found: m".to_string())
    );
}

#[test]
fn nested_macro_definitions_are_not_recognized() {
    // Only top-level `let … = macro` statements are extracted. A macro
    // literal anywhere else survives into evaluation, where it is an
    // explicit error rather than a silently absent value.
    assert_eq!(
        run_value("let f = fn() { let m = macro() { quote(1) }; 1 }; f();"),
        Object::Error("macro definitions are only recognized at top level".to_string())
    );
    // same for a bare macro literal in expression position
    assert_eq!(
        run_value("fn() { macro(x) { quote(unquote(x)) } }();"),
        Object::Error("macro definitions are only recognized at top level".to_string())
    );
}
