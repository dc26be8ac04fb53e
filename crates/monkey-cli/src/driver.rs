//! The batch pipeline: whole source in, report out.
//!
//! Parser errors suppress evaluation and print the monkey face; a clean
//! parse prints the welcome banner, runs the program, and prints the
//! final value's inspect form (nothing, if the program produced no
//! value). `puts` writes to the same sink.

use std::io::Write;

use monkey_eval::Environment;
use monkey_parse::parse_source;

pub const WELCOME: &str = r#"                         __
 /'\_/`\                /\ \
/\      \    ___     ___\ \ \/'\      __   __  __
\ \ \__\ \  / __`\ /' _ `\ \ , <    /'__`\/\ \/\ \
 \ \ \_/\ \/\ \L\ \/\ \/\ \ \ \\`\ /\  __/\ \ \_\ \
  \ \_\\ \_\ \____/\ \_\ \_\ \_\ \_\ \____\\/`____ \
   \/_/ \/_/\/___/  \/_/\/_/\/_/\/_/\/____/ `/___/> \
                                               /\___/
                                               \/__/ "#;

pub const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'"#;

pub fn run_source(src: &str, out: &mut dyn Write) -> std::io::Result<()> {
    let (program, errors) = parse_source(src);
    if !errors.is_empty() {
        return report_parser_errors(out, &errors);
    }

    writeln!(out, "{WELCOME}")?;
    writeln!(out)?;

    let env = Environment::new();
    let macro_env = Environment::new();
    if let Some(result) = monkey_eval::run(program, &env, &macro_env, out) {
        writeln!(out, "{result}")?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn report_parser_errors(out: &mut dyn Write, errors: &[String]) -> std::io::Result<()> {
    writeln!(out, "{MONKEY_FACE}")?;
    writeln!(out, "Woops! We ran into some monkey business here!")?;
    writeln!(out, "parser errors:")?;
    for (i, error) in errors.iter().enumerate() {
        writeln!(out, "{}.{}", i + 1, error)?;
    }
    Ok(())
}
