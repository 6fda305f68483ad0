//! Destination for the `print` builtin.
//!
//! Hosts pick where script output goes: the process stdout, an in-memory
//! buffer (tests, embedding), or nowhere.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Captures printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, line: &str) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(line);
        buffer.push('\n');
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Return the captured output and reset the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Where `print` writes.
pub enum PrintHandler {
    Stdout,
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandler {
    pub fn println(&self, line: &str) {
        match self {
            PrintHandler::Stdout => {
                // A closed pipe is not a script error.
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
            PrintHandler::Buffer(buffer) => buffer.println(line),
            PrintHandler::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.output(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Drain captured output.
    pub fn take(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.take(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }
}

/// Print handler shared between an interpreter and its host.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests;
