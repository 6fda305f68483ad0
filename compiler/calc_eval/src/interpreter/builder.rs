//! Builder for `Interpreter`.

use std::rc::Rc;

use super::Interpreter;
use crate::builtins::install_prelude;
use crate::compile::Compiler;
use crate::errors::EvalResult;
use crate::matching::register_symbols;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::symbols::SymbolMap;
use crate::value::{TypeDomain, TypedValue};

/// Configures an [`Interpreter`].
///
/// Values handed to [`pattern_constant`](Self::pattern_constant) must come
/// from the builder's own domain; use [`domain`](Self::domain) to make them.
///
/// ```text
/// let builder = Interpreter::builder();
/// let zero = builder.domain().int(0);
/// let interpreter = builder.pattern_constant("ZERO", zero).build()?;
/// ```
pub struct InterpreterBuilder {
    domain: Rc<TypeDomain>,
    print_handler: Option<SharedPrintHandler>,
    prelude: bool,
    pattern_constants: Vec<(Rc<str>, TypedValue)>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            domain: TypeDomain::new(),
            print_handler: None,
            prelude: true,
            pattern_constants: Vec::new(),
        }
    }

    pub fn domain(&self) -> &Rc<TypeDomain> {
        &self.domain
    }

    /// Share an existing domain, e.g. one with host kinds registered.
    #[must_use]
    pub fn with_domain(mut self, domain: Rc<TypeDomain>) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Whether to install the builtin library. `match` and `pattern` are
    /// installed either way.
    #[must_use]
    pub fn prelude(mut self, enabled: bool) -> Self {
        self.prelude = enabled;
        self
    }

    /// Bind a name in the pattern environment.
    #[must_use]
    pub fn pattern_constant(mut self, name: impl Into<Rc<str>>, value: TypedValue) -> Self {
        self.pattern_constants.push((name.into(), value));
        self
    }

    pub fn build(self) -> EvalResult<Interpreter> {
        let domain = self.domain;
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let globals = SymbolMap::top();
        let pattern_env = SymbolMap::top();

        for (name, value) in self.pattern_constants {
            pattern_env.put_value(name, value)?;
        }
        register_symbols(&domain, &globals, &pattern_env)?;
        if self.prelude {
            install_prelude(&domain, &globals, &print_handler)?;
        }

        Ok(Interpreter {
            compiler: Compiler::new(Rc::clone(&domain)),
            domain,
            globals,
            pattern_env,
            print_handler,
        })
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
