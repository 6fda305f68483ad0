//! Chained symbol scopes.
//!
//! A `SymbolMap` is a shared handle to one scope layer. Layers form a tree
//! through parent links; closures keep their defining layer alive by
//! holding a handle.
//!
//! | kind | `get` | `put` |
//! |---|---|---|
//! | top | own | own |
//! | local | own, then parent | own |
//! | nested | own, then parent | parent |
//! | protection | parent | rejected |
//! | placeholders | parent, else a placeholder symbol | rejected |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::callable::call_value;
use crate::composite::{Capability, Composite};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::value::{TypeDomain, TypedValue};

/// Behavior of a scope layer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    Top,
    Nested,
    Local,
    Protection,
    Placeholders,
}

struct Scope {
    kind: ScopeKind,
    bindings: RefCell<FxHashMap<Rc<str>, Symbol>>,
    parent: Option<SymbolMap>,
}

/// Shared handle to a scope layer.
#[derive(Clone)]
pub struct SymbolMap(Rc<Scope>);

impl SymbolMap {
    fn layer(kind: ScopeKind, parent: Option<&SymbolMap>) -> Self {
        SymbolMap(Rc::new(Scope {
            kind,
            bindings: RefCell::new(FxHashMap::default()),
            parent: parent.cloned(),
        }))
    }

    /// Root scope with no parent.
    pub fn top() -> Self {
        Self::layer(ScopeKind::Top, None)
    }

    /// Fresh writable layer over `parent`.
    pub fn local(parent: &SymbolMap) -> Self {
        Self::layer(ScopeKind::Local, Some(parent))
    }

    /// Layer exposing `seed` over `parent`; writes go to `parent`.
    pub fn nested(
        parent: &SymbolMap,
        seed: impl IntoIterator<Item = (Rc<str>, Symbol)>,
    ) -> Self {
        let map = Self::layer(ScopeKind::Nested, Some(parent));
        map.0.bindings.borrow_mut().extend(seed);
        map
    }

    /// Read-only view of `parent`.
    pub fn protection(parent: &SymbolMap) -> Self {
        Self::layer(ScopeKind::Protection, Some(parent))
    }

    /// Read-only view of `parent` in which unbound names become placeholders.
    pub fn placeholders(parent: &SymbolMap) -> Self {
        Self::layer(ScopeKind::Placeholders, Some(parent))
    }

    pub fn kind(&self) -> ScopeKind {
        self.0.kind
    }

    pub fn parent(&self) -> Option<&SymbolMap> {
        self.0.parent.as_ref()
    }

    pub fn ptr_eq(&self, other: &SymbolMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        match self.0.kind {
            ScopeKind::Top | ScopeKind::Local | ScopeKind::Nested => {
                if let Some(symbol) = self.0.bindings.borrow().get(name) {
                    return Some(symbol.clone());
                }
                self.parent_get(name)
            }
            ScopeKind::Protection => self.parent_get(name),
            ScopeKind::Placeholders => self
                .parent_get(name)
                .or_else(|| Some(Symbol::Placeholder(Rc::from(name)))),
        }
    }

    fn parent_get(&self, name: &str) -> Option<Symbol> {
        self.0.parent.as_ref().and_then(|parent| parent.get(name))
    }

    pub fn put(&self, name: impl Into<Rc<str>>, symbol: Symbol) -> EvalResult<()> {
        let name = name.into();
        match (self.0.kind, &self.0.parent) {
            (ScopeKind::Protection | ScopeKind::Placeholders, _) => {
                Err(EvalError::ProtectedScopeWrite(name.to_string()))
            }
            (ScopeKind::Nested, Some(parent)) => parent.put(name, symbol),
            (ScopeKind::Top | ScopeKind::Local | ScopeKind::Nested, _) => {
                self.0.bindings.borrow_mut().insert(name, symbol);
                Ok(())
            }
        }
    }

    pub fn put_value(&self, name: impl Into<Rc<str>>, value: TypedValue) -> EvalResult<()> {
        self.put(name, Symbol::Value(value))
    }

    /// Names bound directly in this layer, sorted.
    pub fn own_names(&self) -> Vec<Rc<str>> {
        let mut names: Vec<Rc<str>> = self.0.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for SymbolMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolMap")
            .field("kind", &self.0.kind)
            .field("names", &self.own_names())
            .field("parent", &self.0.parent)
            .finish()
    }
}

/// Entry in a scope.
#[derive(Clone, Debug)]
pub enum Symbol {
    Value(TypedValue),
    /// Unbound name seen through a placeholder scope.
    Placeholder(Rc<str>),
}

impl Symbol {
    /// Value pushed by `get name`.
    pub fn get(&self, domain: &Rc<TypeDomain>) -> TypedValue {
        match self {
            Symbol::Value(value) => value.clone(),
            Symbol::Placeholder(name) => domain.composite(Composite::single(
                "patternBind",
                Capability::VarPlaceholder(Rc::clone(name)),
            )),
        }
    }

    /// Behavior of `call name(args)`.
    pub fn call(
        &self,
        frame: &mut Frame,
        args: Option<usize>,
        rets: Option<usize>,
    ) -> EvalResult<()> {
        match self {
            Symbol::Value(value) => call_value(frame, value, args, rets),
            Symbol::Placeholder(name) => {
                let argc = args.ok_or_else(|| EvalError::MissingArgumentCount(name.to_string()))?;
                if let Some(rets) = rets.filter(|&rets| rets != 1) {
                    return Err(EvalError::ReturnCount {
                        name: name.to_string(),
                        expected: 1,
                        actual: rets,
                    });
                }
                let args = frame.stack_mut().pop_n(argc)?;
                let placeholder = frame.domain().composite(Composite::single(
                    "patternCtor",
                    Capability::CtorPlaceholder {
                        name: Rc::clone(name),
                        args,
                    },
                ));
                frame.stack_mut().push(placeholder);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
