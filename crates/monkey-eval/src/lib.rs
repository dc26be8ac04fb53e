#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod builtins;
mod env;
mod eval;
mod macros;
mod object;
mod quote;

pub use builtins::Builtin;
pub use env::{Environment, EnvRef};
pub use eval::Evaluator;
pub use macros::define_macros;
pub use object::{HashKey, HashTable, Object};

use std::io::Write;

use monkey_ast::ast::Program;

/// Run a parsed program to completion: extract macro definitions into
/// `macro_env`, expand macro calls, then evaluate against `env`.
///
/// Returns `None` when the program produced no final value (it is empty
/// or its last statement was a `let`). A macro-expansion failure becomes
/// the final value, as an `Object::Error`.
pub fn run(
    program: Program,
    env: &EnvRef,
    macro_env: &EnvRef,
    out: &mut dyn Write,
) -> Option<Object> {
    let mut program = program;
    define_macros(&mut program, macro_env);

    let mut evaluator = Evaluator::new(out);
    let expanded = match evaluator.expand_macros(program, macro_env) {
        Ok(program) => program,
        Err(err) => return Some(err),
    };
    evaluator.eval_program(&expanded, env)
}
