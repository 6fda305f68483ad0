//! The `eval` command: evaluate an expression given on the command line.

use super::{new_interpreter, report_and_exit};
use crate::run_source;

/// Evaluate `source` and print each resulting value, bottom of the stack
/// first.
pub fn eval_expr(source: &str) {
    let interpreter = new_interpreter();
    match run_source(&interpreter, source) {
        Ok(values) => {
            for value in values {
                println!("{}", value.repr());
            }
        }
        Err(error) => report_and_exit(&error, "<expr>", source),
    }
}
