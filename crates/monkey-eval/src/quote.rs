//! `quote` / `unquote`.
//!
//! `quote(expr)` captures `expr` as an AST value, after replacing every
//! `unquote(x)` call inside it with the AST form of the evaluated `x`.

use monkey_ast::ast::Expression;
use monkey_ast::modify::{modify_expression, Node};

use crate::env::EnvRef;
use crate::eval::Evaluator;
use crate::object::Object;

impl Evaluator<'_> {
    pub(crate) fn quote(&mut self, expression: Expression, env: &EnvRef) -> Object {
        match self.eval_unquote_calls(expression, env) {
            Ok(node) => Object::Quote(node),
            Err(err) => err,
        }
    }

    fn eval_unquote_calls(
        &mut self,
        expression: Expression,
        env: &EnvRef,
    ) -> Result<Expression, Object> {
        let mut failure: Option<Object> = None;
        let result = modify_expression(expression, &mut |node| {
            if failure.is_some() {
                return node;
            }
            match node {
                Node::Expression(Expression::Call {
                    function,
                    arguments,
                }) if function.token_literal() == "unquote" && arguments.len() == 1 => {
                    let evaluated = self.eval_expression(&arguments[0], env);
                    if evaluated.is_error() {
                        failure = Some(evaluated);
                        return Node::Expression(Expression::Call {
                            function,
                            arguments,
                        });
                    }
                    match object_to_expression(evaluated) {
                        Ok(spliced) => Node::Expression(spliced),
                        Err(err) => {
                            failure = Some(err);
                            Node::Expression(Expression::Call {
                                function,
                                arguments,
                            })
                        }
                    }
                }
                other => other,
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }
}

/// AST form of an evaluated value. Only integers, booleans, strings, and
/// quotes have one; anything else is a macro-expansion error rather than
/// a hole in the tree.
fn object_to_expression(obj: Object) -> Result<Expression, Object> {
    match obj {
        Object::Integer(value) => Ok(Expression::Integer(value)),
        Object::Boolean(value) => Ok(Expression::Boolean(value)),
        Object::String(value) => Ok(Expression::String(value)),
        Object::Quote(node) => Ok(node),
        other => Err(Object::Error(format!(
            "unquote: cannot represent {} as an expression",
            other.type_name()
        ))),
    }
}
