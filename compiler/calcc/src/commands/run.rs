//! The `run` command: execute a calc source file.

use super::{new_interpreter, read_file, report_and_exit};
use crate::run_source;

/// Run a file. Output comes from the program's own `print` calls; values
/// left on the stack are discarded.
pub fn run_file(path: &str) {
    let source = read_file(path);
    let interpreter = new_interpreter();
    match run_source(&interpreter, &source) {
        Ok(values) => tracing::debug!(path, leftover = values.len(), "program finished"),
        Err(error) => report_and_exit(&error, path, &source),
    }
}
