//! Host-facing entry point.
//!
//! An `Interpreter` owns a type domain, the global scope, the scope pattern
//! literals resolve constructors in, and the print sink. Programs are
//! compiled once and executed on a fresh stack over the globals; bindings
//! made by `name = value` persist across executions.

mod builder;

use std::rc::Rc;

use calc_ir::ExprNode;

pub use builder::InterpreterBuilder;

use crate::callable::Callable;
use crate::code::Code;
use crate::compile::Compiler;
use crate::errors::{CompileError, EvalResult};
use crate::frame::Frame;
use crate::print_handler::SharedPrintHandler;
use crate::symbols::SymbolMap;
use crate::value::{TypeDomain, TypedValue};

pub struct Interpreter {
    domain: Rc<TypeDomain>,
    globals: SymbolMap,
    pattern_env: SymbolMap,
    print_handler: SharedPrintHandler,
    compiler: Compiler,
}

impl Interpreter {
    /// Interpreter with the prelude and a stdout print handler.
    pub fn new() -> EvalResult<Self> {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn domain(&self) -> &Rc<TypeDomain> {
        &self.domain
    }

    #[inline]
    pub fn globals(&self) -> &SymbolMap {
        &self.globals
    }

    /// Scope consulted when pattern literals name a constructor or constant.
    #[inline]
    pub fn pattern_env(&self) -> &SymbolMap {
        &self.pattern_env
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn compile(&self, node: &ExprNode) -> Result<Code, CompileError> {
        self.compiler.compile(node)
    }

    /// Run `code` over the globals and return everything left on the stack.
    pub fn execute(&self, code: &Code) -> EvalResult<Vec<TypedValue>> {
        let mut frame = Frame::new(Rc::clone(&self.domain), self.globals.clone());
        code.execute(&mut frame)?;
        let results = frame.into_values();
        tracing::debug!(results = results.len(), "execution finished");
        Ok(results)
    }

    /// Bind `name` in the global scope.
    pub fn define(&self, name: &str, value: TypedValue) -> EvalResult<()> {
        self.globals.put_value(name, value)
    }

    /// Bind a native callable under its own name.
    pub fn register(&self, callable: Callable) -> EvalResult<()> {
        let name: Rc<str> = Rc::from(callable.name());
        let value = self.domain.callable(callable);
        self.globals.put_value(name, value)
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("domain", &self.domain)
            .field("globals", &self.globals.own_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
