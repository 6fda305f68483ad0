//! Command handlers for the `calc` CLI.
//!
//! Handlers report errors on stderr and exit with status 1; the binary only
//! dispatches on the subcommand.

mod disasm;
mod eval;
mod run;

pub use disasm::disasm_file;
pub use eval::eval_expr;
pub use run::run_file;

use calc_eval::Interpreter;

use crate::{line_col, CalcError};

pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn new_interpreter() -> Interpreter {
    match Interpreter::new() {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("error: failed to set up interpreter: {e}");
            std::process::exit(1);
        }
    }
}

/// Print `error` with a `file:line:col` pointer when it has a span, then
/// exit.
pub(crate) fn report_and_exit(error: &CalcError, origin: &str, source: &str) -> ! {
    eprintln!("error: {error}");
    if let Some(span) = error.span() {
        let (line, column) = line_col(source, span.start);
        eprintln!("  --> {origin}:{line}:{column}");
        if let Some(text) = source.lines().nth(line - 1) {
            eprintln!("   | {text}");
            eprintln!("   | {}^", " ".repeat(column - 1));
        }
    }
    std::process::exit(1);
}
