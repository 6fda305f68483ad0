//! The `disasm` command: print compiled instructions without running.

use super::{new_interpreter, read_file, report_and_exit};
use crate::compile_source;

pub fn disasm_file(path: &str) {
    let source = read_file(path);
    let interpreter = new_interpreter();
    match compile_source(&interpreter, &source) {
        Ok(code) => {
            for line in code.disassemble() {
                println!("{line}");
            }
        }
        Err(error) => report_and_exit(&error, path, &source),
    }
}
