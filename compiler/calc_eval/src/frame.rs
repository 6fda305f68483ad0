//! Evaluation context: a value stack paired with a symbol scope.

use std::rc::Rc;

use crate::stack::Stack;
use crate::symbols::SymbolMap;
use crate::value::{TypeDomain, TypedValue};

/// One evaluation context. Frames own their stacks; scopes may be shared.
pub struct Frame {
    domain: Rc<TypeDomain>,
    stack: Stack,
    symbols: SymbolMap,
}

impl Frame {
    pub fn new(domain: Rc<TypeDomain>, symbols: SymbolMap) -> Self {
        Frame {
            domain,
            stack: Stack::new(),
            symbols,
        }
    }

    /// Isolated frame with a fresh root scope.
    pub fn top(domain: &Rc<TypeDomain>) -> Self {
        Frame::new(Rc::clone(domain), SymbolMap::top())
    }

    /// Fresh stack over a read-only view of `symbols`.
    pub fn protection(domain: &Rc<TypeDomain>, symbols: &SymbolMap) -> Self {
        Frame::new(Rc::clone(domain), SymbolMap::protection(symbols))
    }

    /// Fresh stack over a new local layer on the captured `scope`.
    pub fn closure(domain: &Rc<TypeDomain>, scope: &SymbolMap) -> Self {
        Frame::new(Rc::clone(domain), SymbolMap::local(scope))
    }

    #[inline]
    pub fn domain(&self) -> &Rc<TypeDomain> {
        &self.domain
    }

    #[inline]
    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    #[inline]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    #[inline]
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Consume the frame, returning what is left on its stack.
    pub fn into_values(self) -> Vec<TypedValue> {
        self.stack.into_vec()
    }
}
