//! Macro definition extraction and call-site expansion. Both passes run
//! between parsing and the main evaluation.

use std::rc::Rc;

use monkey_ast::ast::{Expression, Program, Statement};
use monkey_ast::modify::{modify_program, Node};

use crate::env::{Environment, EnvRef};
use crate::eval::Evaluator;
use crate::object::Object;

/// Bind every top-level `let <name> = macro(…) { … };` in `env` and
/// remove it from the program. Macro definitions nested inside functions
/// or blocks are not recognized.
pub fn define_macros(program: &mut Program, env: &EnvRef) {
    program.statements.retain(|statement| match statement {
        Statement::Let {
            name,
            value: Expression::Macro { parameters, body },
        } => {
            let macro_obj = Object::Macro {
                parameters: parameters.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            };
            env.borrow_mut().set(name.clone(), macro_obj);
            false
        }
        _ => true,
    });
}

impl Evaluator<'_> {
    /// Expand every call whose callee is an identifier bound to a macro
    /// in `env`. The call's arguments are bound as quoted AST, the macro
    /// body is evaluated, and the resulting quote's node replaces the
    /// call. A body result that is neither a quote nor an error leaves
    /// the call unchanged.
    pub fn expand_macros(&mut self, program: Program, env: &EnvRef) -> Result<Program, Object> {
        let mut failure: Option<Object> = None;
        let expanded = modify_program(program, &mut |node| {
            if failure.is_some() {
                return node;
            }
            let Node::Expression(Expression::Call {
                function,
                arguments,
            }) = node
            else {
                return node;
            };

            let rebuilt = |function, arguments| {
                Node::Expression(Expression::Call {
                    function,
                    arguments,
                })
            };

            let Expression::Identifier(name) = function.as_ref() else {
                return rebuilt(function, arguments);
            };
            let binding = env.borrow().get(name);
            let Some(Object::Macro {
                parameters,
                body,
                env: macro_env,
            }) = binding
            else {
                return rebuilt(function, arguments);
            };

            if arguments.len() != parameters.len() {
                failure = Some(Object::Error(format!(
                    "wrong number of arguments in macro expansion. got={}, want={}",
                    arguments.len(),
                    parameters.len()
                )));
                return rebuilt(function, arguments);
            }

            // arguments are substituted as AST, never evaluated
            let extended = Environment::new_enclosed(macro_env);
            for (parameter, argument) in parameters.iter().zip(&arguments) {
                extended
                    .borrow_mut()
                    .set(parameter.clone(), Object::Quote(argument.clone()));
            }

            match self.eval_block(&body, &extended) {
                Some(Object::Quote(spliced)) => Node::Expression(spliced),
                Some(Object::Error(message)) => {
                    failure = Some(Object::Error(message));
                    rebuilt(function, arguments)
                }
                _ => rebuilt(function, arguments),
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(expanded),
        }
    }
}
