//! The tree walk.
//!
//! Every rule checks sub-results for `Object::Error` before using them,
//! so errors propagate to the top of the evaluation like a one-way
//! exception. Statements evaluate to `Option<Object>`: `None` marks the
//! absence of a value (a successful `let`), which the driver renders as
//! no output at all.

use std::io::Write;
use std::rc::Rc;

use monkey_ast::ast::{Block, Expression, Program, Statement};

use crate::builtins::Builtin;
use crate::env::{Environment, EnvRef};
use crate::object::{HashKey, HashTable, Object};

/// Maximum function-call depth. Runaway recursion becomes an error
/// object instead of a host stack overflow.
const MAX_CALL_DEPTH: u32 = 1000;

pub struct Evaluator<'a> {
    pub(crate) out: &'a mut dyn Write,
    call_depth: u32,
}

impl<'a> Evaluator<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, call_depth: 0 }
    }

    /// Evaluate a program: a `return` at the top level stops evaluation
    /// and yields its unwrapped value, an error stops and yields itself.
    pub fn eval_program(&mut self, program: &Program, env: &EnvRef) -> Option<Object> {
        let mut result = None;
        for statement in &program.statements {
            match self.eval_statement(statement, env) {
                Some(Object::Return(value)) => return Some(*value),
                err @ Some(Object::Error(_)) => return err,
                other => result = other,
            }
        }
        result
    }

    /// Evaluate a block. Unlike `eval_program`, `Return` values pass
    /// through unwrapped so nested blocks propagate them to the
    /// enclosing function boundary.
    pub(crate) fn eval_block(&mut self, block: &Block, env: &EnvRef) -> Option<Object> {
        let mut result = None;
        for statement in &block.statements {
            match self.eval_statement(statement, env) {
                stop @ Some(Object::Return(_) | Object::Error(_)) => return stop,
                other => result = other,
            }
        }
        result
    }

    fn eval_statement(&mut self, statement: &Statement, env: &EnvRef) -> Option<Object> {
        match statement {
            Statement::Expr(expression) => Some(self.eval_expression(expression, env)),
            Statement::Return { value } => {
                let value = match value {
                    Some(expression) => self.eval_expression(expression, env),
                    None => Object::Null,
                };
                if value.is_error() {
                    return Some(value);
                }
                Some(Object::Return(Box::new(value)))
            }
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env);
                if value.is_error() {
                    return Some(value);
                }
                env.borrow_mut().set(name.clone(), value);
                None
            }
        }
    }

    pub fn eval_expression(&mut self, expression: &Expression, env: &EnvRef) -> Object {
        match expression {
            Expression::Integer(value) => Object::Integer(*value),
            Expression::Boolean(value) => Object::Boolean(*value),
            Expression::String(value) => Object::String(value.clone()),
            Expression::Identifier(name) => self.eval_identifier(name, env),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix(operator, right)
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix(operator, left, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expression(condition, env);
                if condition.is_error() {
                    return condition;
                }
                if condition.is_truthy() {
                    self.eval_block(consequence, env).unwrap_or(Object::Null)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env).unwrap_or(Object::Null)
                } else {
                    Object::Null
                }
            }
            Expression::Function { parameters, body } => Object::Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            },
            // macro literals are extracted before evaluation; one that
            // survives was defined somewhere other than top level
            Expression::Macro { .. } => {
                Object::Error("macro definitions are only recognized at top level".to_string())
            }
            Expression::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Object::Array(elements),
                Err(err) => err,
            },
            Expression::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expression::Index { left, index } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(index, env);
                if index.is_error() {
                    return index;
                }
                eval_index(left, index)
            }
            Expression::Call {
                function,
                arguments,
            } => self.eval_call(function, arguments, env),
        }
    }

    fn eval_identifier(&mut self, name: &str, env: &EnvRef) -> Object {
        if let Some(builtin) = Builtin::lookup(name) {
            return Object::Builtin(builtin);
        }
        match env.borrow().get(name) {
            Some(value) => value,
            None => Object::Error(format!("identifier not found: {name}")),
        }
    }

    /// Left-to-right, stopping at the first error.
    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        env: &EnvRef,
    ) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let evaluated = self.eval_expression(expression, env);
            if evaluated.is_error() {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }

    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expression, Expression)],
        env: &EnvRef,
    ) -> Object {
        let mut table = HashTable::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr, env);
            if key.is_error() {
                return key;
            }
            let Some(hash_key) = HashKey::from_object(&key) else {
                return Object::Error(format!("unusable as hash key: {}", key.type_name()));
            };
            let value = self.eval_expression(value_expr, env);
            if value.is_error() {
                return value;
            }
            table.insert(hash_key, key, value);
        }
        Object::Hash(table)
    }

    fn eval_call(
        &mut self,
        function: &Expression,
        arguments: &[Expression],
        env: &EnvRef,
    ) -> Object {
        // `quote` suppresses evaluation of its argument entirely, so it
        // is dispatched on the callee's token literal before anything is
        // evaluated.
        if function.token_literal() == "quote" {
            if arguments.len() != 1 {
                return Object::Error(format!(
                    "wrong number of arguments in quote. got={}, want=1",
                    arguments.len()
                ));
            }
            return self.quote(arguments[0].clone(), env);
        }

        let callee = self.eval_expression(function, env);
        if callee.is_error() {
            return callee;
        }
        let args = match self.eval_expressions(arguments, env) {
            Ok(args) => args,
            Err(err) => return err,
        };
        self.apply_function(callee, args)
    }

    pub(crate) fn apply_function(&mut self, callee: Object, args: Vec<Object>) -> Object {
        match callee {
            Object::Function {
                parameters,
                body,
                env,
            } => {
                self.call_depth += 1;
                if self.call_depth > MAX_CALL_DEPTH {
                    self.call_depth -= 1;
                    return Object::Error(format!(
                        "maximum call depth exceeded (limit: {} calls)",
                        MAX_CALL_DEPTH
                    ));
                }

                // Lexical scope: the new frame closes over the function's
                // defining environment, never the call site. Arity is
                // unchecked: extras are dropped, missing stay unbound.
                let extended = Environment::new_enclosed(env);
                for (parameter, arg) in parameters.iter().zip(args) {
                    extended.borrow_mut().set(parameter.clone(), arg);
                }

                let result = self.eval_block(&body, &extended);
                self.call_depth -= 1;

                match result {
                    Some(Object::Return(value)) => *value,
                    Some(other) => other,
                    None => Object::Null,
                }
            }
            Object::Builtin(builtin) => builtin.apply(args, &mut *self.out),
            other => Object::Error(format!("not a function: {}", other.type_name())),
        }
    }
}

fn eval_prefix(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Object::Error(format!(
            "unknown operator: {}{}",
            operator,
            right.type_name()
        )),
    }
}

fn eval_infix(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix(operator, left, right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix(operator, left, right)
        }
        (left, right) => match operator {
            // identity comparison: only the Boolean/Null singletons can
            // compare equal here, and never across types
            "==" => Object::Boolean(identical(&left, &right)),
            "!=" => Object::Boolean(!identical(&left, &right)),
            _ if left.type_name() != right.type_name() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
    }
}

fn identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        // truncation toward zero; division by zero follows the host
        "/" => Object::Integer(left / right),
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: String, right: String) -> Object {
    match operator {
        "+" => Object::String(left + &right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: STRING {operator} STRING")),
    }
}

fn eval_index(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if i < 0 || i as usize >= elements.len() {
                Object::Null
            } else {
                elements[i as usize].clone()
            }
        }
        (Object::Hash(table), index) => match HashKey::from_object(&index) {
            Some(key) => table.get(&key).cloned().unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", index.type_name())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}
