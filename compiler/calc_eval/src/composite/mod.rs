//! Composite values: a name plus a set of capability traits.
//!
//! Each trait kind appears at most once. Lookups go through `has`,
//! `get` (fails with `MissingTrait`) and `get_optional`.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::callable::Callable;
use crate::errors::{EvalError, EvalResult};
use crate::matching::IPattern;
use crate::value::TypedValue;

/// Trait kinds a composite can carry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TraitKind {
    Callable,
    Decomposable,
    Structured,
    Pattern,
    VarPlaceholder,
    CtorPlaceholder,
}

impl TraitKind {
    pub fn name(self) -> &'static str {
        match self {
            TraitKind::Callable => "callable",
            TraitKind::Decomposable => "decomposable",
            TraitKind::Structured => "structured",
            TraitKind::Pattern => "pattern",
            TraitKind::VarPlaceholder => "var placeholder",
            TraitKind::CtorPlaceholder => "constructor placeholder",
        }
    }
}

/// Splits a value into its components for pattern matching.
pub trait Decomposable {
    /// `None` means `value` was not built by this constructor. A returned
    /// vector must hold exactly `expected` values; anything else is a
    /// contract violation the pattern engine reports as fatal.
    fn try_decompose(&self, value: &TypedValue, expected: usize) -> Option<Vec<TypedValue>>;
}

/// Member lookup for the `.` operator and `with`.
pub trait Structured {
    fn get(&self, key: &str) -> Option<TypedValue>;

    /// Member names in declaration order.
    fn keys(&self) -> Vec<Rc<str>>;

    fn as_any(&self) -> &dyn Any;
}

/// One trait instance.
#[derive(Clone)]
pub enum Capability {
    Callable(Callable),
    Decomposable(Rc<dyn Decomposable>),
    Structured(Rc<dyn Structured>),
    Pattern(Rc<IPattern>),
    /// Unbound identifier read inside a pattern literal.
    VarPlaceholder(Rc<str>),
    /// Unbound identifier called inside a pattern literal.
    CtorPlaceholder {
        name: Rc<str>,
        args: Vec<TypedValue>,
    },
}

impl Capability {
    pub fn kind(&self) -> TraitKind {
        match self {
            Capability::Callable(_) => TraitKind::Callable,
            Capability::Decomposable(_) => TraitKind::Decomposable,
            Capability::Structured(_) => TraitKind::Structured,
            Capability::Pattern(_) => TraitKind::Pattern,
            Capability::VarPlaceholder(_) => TraitKind::VarPlaceholder,
            Capability::CtorPlaceholder { .. } => TraitKind::CtorPlaceholder,
        }
    }
}

/// Structural object with capabilities. Immutable once built.
pub struct Composite {
    name: Rc<str>,
    traits: SmallVec<[Capability; 2]>,
}

impl Composite {
    pub fn builder(name: impl Into<Rc<str>>) -> CompositeBuilder {
        CompositeBuilder {
            name: name.into(),
            traits: SmallVec::new(),
        }
    }

    /// Composite with a single trait.
    pub fn single(name: impl Into<Rc<str>>, capability: Capability) -> Composite {
        Composite::builder(name).with(capability).build()
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has(&self, kind: TraitKind) -> bool {
        self.get_optional(kind).is_some()
    }

    pub fn get_optional(&self, kind: TraitKind) -> Option<&Capability> {
        self.traits.iter().find(|capability| capability.kind() == kind)
    }

    pub fn get(&self, kind: TraitKind) -> EvalResult<&Capability> {
        self.get_optional(kind)
            .ok_or_else(|| EvalError::MissingTrait {
                composite: self.name.to_string(),
                trait_name: kind.name(),
            })
    }

    pub fn trait_kinds(&self) -> impl Iterator<Item = TraitKind> + '_ {
        self.traits.iter().map(Capability::kind)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::VarPlaceholder(name) => write!(f, "VarPlaceholder({name})"),
            Capability::CtorPlaceholder { name, args } => {
                write!(f, "CtorPlaceholder({name}, {} arg(s))", args.len())
            }
            other => fmt::Debug::fmt(&other.kind(), f),
        }
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("name", &self.name)
            .field("traits", &self.trait_kinds().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Composite`]. A later trait replaces an earlier one of the
/// same kind.
pub struct CompositeBuilder {
    name: Rc<str>,
    traits: SmallVec<[Capability; 2]>,
}

impl CompositeBuilder {
    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        let kind = capability.kind();
        self.traits.retain(|existing| existing.kind() != kind);
        self.traits.push(capability);
        self
    }

    pub fn build(self) -> Composite {
        Composite {
            name: self.name,
            traits: self.traits,
        }
    }
}

#[cfg(test)]
mod tests;
