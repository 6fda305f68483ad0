//! Runtime values and the type domain that owns their kinds.
//!
//! Every `TypedValue` carries a reference to the `TypeDomain` that created
//! it. The domain is the only source of kind identity: values from two
//! domains are never type-compatible or equal, even when the kind names
//! agree.
//!
//! ```text
//! let domain = TypeDomain::new();
//! let n = domain.int(42);
//! assert_eq!(domain.as_int(&n, "example")?, 42);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;

use crate::callable::Callable;
use crate::code::Code;
use crate::composite::{Capability, Composite};
use crate::errors::{EvalError, EvalResult};

/// Kind tag within a `TypeDomain`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Kind(u16);

impl Kind {
    pub const NULL: Kind = Kind(0);
    pub const BOOL: Kind = Kind(1);
    pub const INT: Kind = Kind(2);
    pub const FLOAT: Kind = Kind(3);
    pub const STR: Kind = Kind(4);
    pub const CONS: Kind = Kind(5);
    pub const CODE: Kind = Kind(6);
    pub const CALLABLE: Kind = Kind(7);
    pub const COMPOSITE: Kind = Kind(8);

    const BUILTIN_NAMES: [&'static str; 9] = [
        "null",
        "bool",
        "int",
        "float",
        "str",
        "cons",
        "code",
        "callable",
        "composite",
    ];

    #[inline]
    pub fn index(self) -> u16 {
        self.0
    }

    /// Kinds registered at runtime carry opaque payloads.
    #[inline]
    pub fn is_opaque(self) -> bool {
        usize::from(self.0) >= Self::BUILTIN_NAMES.len()
    }
}

/// Truthiness rule for a host-registered kind.
pub type TruthinessFn = Rc<dyn Fn(&TypedValue) -> bool>;

struct KindInfo {
    name: Rc<str>,
    truthiness: Option<TruthinessFn>,
}

static NEXT_DOMAIN_ID: AtomicU32 = AtomicU32::new(0);

/// Per-session registry of value kinds.
pub struct TypeDomain {
    id: u32,
    kinds: RefCell<Vec<KindInfo>>,
    by_name: RefCell<FxHashMap<Rc<str>, Kind>>,
}

impl TypeDomain {
    /// Create a domain with the builtin kinds registered.
    pub fn new() -> Rc<TypeDomain> {
        let domain = TypeDomain {
            id: NEXT_DOMAIN_ID.fetch_add(1, Ordering::Relaxed),
            kinds: RefCell::new(Vec::new()),
            by_name: RefCell::new(FxHashMap::default()),
        };
        for name in Kind::BUILTIN_NAMES {
            domain.push_kind(name, None);
        }
        Rc::new(domain)
    }

    fn push_kind(&self, name: &str, truthiness: Option<TruthinessFn>) -> Kind {
        let mut kinds = self.kinds.borrow_mut();
        let kind = Kind(u16::try_from(kinds.len()).unwrap_or(u16::MAX));
        let name: Rc<str> = Rc::from(name);
        kinds.push(KindInfo {
            name: Rc::clone(&name),
            truthiness,
        });
        self.by_name.borrow_mut().insert(name, kind);
        kind
    }

    /// Register an opaque kind. Values of it are built with [`TypeDomain::opaque`].
    pub fn register_kind(
        &self,
        name: &str,
        truthiness: Option<TruthinessFn>,
    ) -> EvalResult<Kind> {
        if self.by_name.borrow().contains_key(name) {
            return Err(EvalError::KindAlreadyRegistered(name.to_string()));
        }
        if self.kinds.borrow().len() >= usize::from(u16::MAX) {
            return Err(EvalError::UnknownKind(u16::MAX));
        }
        let kind = self.push_kind(name, truthiness);
        tracing::debug!(domain = self.id, kind = kind.0, name, "registered value kind");
        Ok(kind)
    }

    pub fn kind_by_name(&self, name: &str) -> Option<Kind> {
        self.by_name.borrow().get(name).copied()
    }

    /// Name of `kind`, or `"?"` for a tag this domain never issued.
    pub fn kind_name(&self, kind: Kind) -> Rc<str> {
        self.kinds
            .borrow()
            .get(usize::from(kind.0))
            .map_or_else(|| Rc::from("?"), |info| Rc::clone(&info.name))
    }

    fn is_registered(&self, kind: Kind) -> bool {
        usize::from(kind.0) < self.kinds.borrow().len()
    }

    // Creation

    /// Create a value of `kind`, checking that the payload fits.
    pub fn create(self: &Rc<Self>, kind: Kind, payload: Payload) -> EvalResult<TypedValue> {
        if !self.is_registered(kind) {
            return Err(EvalError::UnknownKind(kind.0));
        }
        let fits = match (&payload, kind) {
            (Payload::Null, Kind::NULL)
            | (Payload::Bool(_), Kind::BOOL)
            | (Payload::Int(_), Kind::INT)
            | (Payload::Float(_), Kind::FLOAT)
            | (Payload::Str(_), Kind::STR)
            | (Payload::Cons(_), Kind::CONS)
            | (Payload::Code(_), Kind::CODE)
            | (Payload::Callable(_), Kind::CALLABLE)
            | (Payload::Composite(_), Kind::COMPOSITE) => true,
            (Payload::Opaque(_), kind) => kind.is_opaque(),
            _ => false,
        };
        if !fits {
            return Err(EvalError::PayloadMismatch(self.kind_name(kind).to_string()));
        }
        Ok(self.make(kind, payload))
    }

    #[inline]
    fn make(self: &Rc<Self>, kind: Kind, payload: Payload) -> TypedValue {
        TypedValue {
            domain: Rc::clone(self),
            kind,
            payload,
        }
    }

    pub fn null(self: &Rc<Self>) -> TypedValue {
        self.make(Kind::NULL, Payload::Null)
    }

    pub fn bool(self: &Rc<Self>, b: bool) -> TypedValue {
        self.make(Kind::BOOL, Payload::Bool(b))
    }

    pub fn int(self: &Rc<Self>, n: i64) -> TypedValue {
        self.make(Kind::INT, Payload::Int(n))
    }

    pub fn float(self: &Rc<Self>, f: f64) -> TypedValue {
        self.make(Kind::FLOAT, Payload::Float(f))
    }

    pub fn string(self: &Rc<Self>, s: impl Into<Rc<str>>) -> TypedValue {
        self.make(Kind::STR, Payload::Str(s.into()))
    }

    pub fn cons(self: &Rc<Self>, car: TypedValue, cdr: TypedValue) -> TypedValue {
        self.make(Kind::CONS, Payload::Cons(Rc::new(Cons { car, cdr })))
    }

    /// Null-terminated cons chain.
    pub fn list(self: &Rc<Self>, items: impl IntoIterator<Item = TypedValue>) -> TypedValue {
        let items: Vec<TypedValue> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(self.null(), |tail, head| self.cons(head, tail))
    }

    pub fn code(self: &Rc<Self>, code: Code) -> TypedValue {
        self.make(Kind::CODE, Payload::Code(code))
    }

    pub fn callable(self: &Rc<Self>, callable: Callable) -> TypedValue {
        self.make(Kind::CALLABLE, Payload::Callable(Rc::new(callable)))
    }

    pub fn composite(self: &Rc<Self>, composite: Composite) -> TypedValue {
        self.make(Kind::COMPOSITE, Payload::Composite(Rc::new(composite)))
    }

    pub fn opaque(self: &Rc<Self>, kind: Kind, payload: Rc<dyn Any>) -> EvalResult<TypedValue> {
        self.create(kind, Payload::Opaque(payload))
    }

    // Queries

    /// Whether `value` belongs to this domain and has kind `kind`.
    pub fn is(&self, value: &TypedValue, kind: Kind) -> bool {
        value.domain.id == self.id && value.kind == kind
    }

    /// Payload of `value` if it has kind `kind`; a type mismatch tagged with
    /// `context` otherwise.
    pub fn as_<'v>(
        &self,
        value: &'v TypedValue,
        kind: Kind,
        context: &str,
    ) -> EvalResult<&'v Payload> {
        if self.is(value, kind) {
            return Ok(&value.payload);
        }
        let got = if value.domain.id == self.id {
            self.kind_name(value.kind).to_string()
        } else {
            format!("{} from another domain", value.kind_name())
        };
        Err(EvalError::TypeMismatch {
            context: context.to_string(),
            expected: self.kind_name(kind).to_string(),
            got,
        })
    }

    pub fn as_bool(&self, value: &TypedValue, context: &str) -> EvalResult<bool> {
        match self.as_(value, Kind::BOOL, context)? {
            Payload::Bool(b) => Ok(*b),
            _ => Err(self.payload_mismatch(Kind::BOOL)),
        }
    }

    pub fn as_int(&self, value: &TypedValue, context: &str) -> EvalResult<i64> {
        match self.as_(value, Kind::INT, context)? {
            Payload::Int(n) => Ok(*n),
            _ => Err(self.payload_mismatch(Kind::INT)),
        }
    }

    pub fn as_float(&self, value: &TypedValue, context: &str) -> EvalResult<f64> {
        match self.as_(value, Kind::FLOAT, context)? {
            Payload::Float(f) => Ok(*f),
            _ => Err(self.payload_mismatch(Kind::FLOAT)),
        }
    }

    pub fn as_str<'v>(&self, value: &'v TypedValue, context: &str) -> EvalResult<&'v Rc<str>> {
        match self.as_(value, Kind::STR, context)? {
            Payload::Str(s) => Ok(s),
            _ => Err(self.payload_mismatch(Kind::STR)),
        }
    }

    pub fn as_cons<'v>(&self, value: &'v TypedValue, context: &str) -> EvalResult<&'v Rc<Cons>> {
        match self.as_(value, Kind::CONS, context)? {
            Payload::Cons(c) => Ok(c),
            _ => Err(self.payload_mismatch(Kind::CONS)),
        }
    }

    pub fn as_code<'v>(&self, value: &'v TypedValue, context: &str) -> EvalResult<&'v Code> {
        match self.as_(value, Kind::CODE, context)? {
            Payload::Code(code) => Ok(code),
            _ => Err(self.payload_mismatch(Kind::CODE)),
        }
    }

    pub fn as_callable<'v>(
        &self,
        value: &'v TypedValue,
        context: &str,
    ) -> EvalResult<&'v Rc<Callable>> {
        match self.as_(value, Kind::CALLABLE, context)? {
            Payload::Callable(c) => Ok(c),
            _ => Err(self.payload_mismatch(Kind::CALLABLE)),
        }
    }

    pub fn as_composite<'v>(
        &self,
        value: &'v TypedValue,
        context: &str,
    ) -> EvalResult<&'v Rc<Composite>> {
        match self.as_(value, Kind::COMPOSITE, context)? {
            Payload::Composite(c) => Ok(c),
            _ => Err(self.payload_mismatch(Kind::COMPOSITE)),
        }
    }

    /// Downcast the payload of an opaque value.
    pub fn as_opaque<T: Any>(&self, value: &TypedValue, kind: Kind, context: &str) -> EvalResult<Rc<T>> {
        match self.as_(value, kind, context)? {
            Payload::Opaque(any) => Rc::clone(any)
                .downcast::<T>()
                .map_err(|_| self.payload_mismatch(kind)),
            _ => Err(self.payload_mismatch(kind)),
        }
    }

    fn payload_mismatch(&self, kind: Kind) -> EvalError {
        EvalError::PayloadMismatch(self.kind_name(kind).to_string())
    }

    /// Domain equality: false across domains and kinds; identity for code,
    /// callables, composites and opaque payloads.
    pub fn equals(&self, left: &TypedValue, right: &TypedValue) -> bool {
        if left.domain.id != self.id || right.domain.id != self.id || left.kind != right.kind {
            return false;
        }
        match (&left.payload, &right.payload) {
            (Payload::Null, Payload::Null) => true,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => {
                a.partial_cmp(b) == Some(std::cmp::Ordering::Equal)
            }
            (Payload::Str(a), Payload::Str(b)) => a == b,
            (Payload::Cons(a), Payload::Cons(b)) => {
                Rc::ptr_eq(a, b) || (self.equals(&a.car, &b.car) && self.equals(&a.cdr, &b.cdr))
            }
            (Payload::Code(a), Payload::Code(b)) => a.ptr_eq(b),
            (Payload::Callable(a), Payload::Callable(b)) => Rc::ptr_eq(a, b),
            (Payload::Composite(a), Payload::Composite(b)) => Rc::ptr_eq(a, b),
            (Payload::Opaque(a), Payload::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `null` false; `bool` itself; numbers non-zero; strings non-empty;
    /// opaque kinds use their registered rule; everything else true.
    pub fn is_truthy(&self, value: &TypedValue) -> bool {
        match &value.payload {
            Payload::Null => false,
            Payload::Bool(b) => *b,
            Payload::Int(n) => *n != 0,
            Payload::Float(f) => *f != 0.0,
            Payload::Str(s) => !s.is_empty(),
            Payload::Opaque(_) => {
                let rule = self
                    .kinds
                    .borrow()
                    .get(usize::from(value.kind.0))
                    .and_then(|info| info.truthiness.clone());
                rule.map_or(true, |rule| rule(value))
            }
            Payload::Cons(_) | Payload::Code(_) | Payload::Callable(_) | Payload::Composite(_) => {
                true
            }
        }
    }
}

impl fmt::Debug for TypeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDomain")
            .field("id", &self.id)
            .field("kinds", &self.kinds.borrow().len())
            .finish()
    }
}

/// A pair cell.
#[derive(Clone, Debug)]
pub struct Cons {
    pub car: TypedValue,
    pub cdr: TypedValue,
}

/// Value payload. Shape is checked against the kind on creation.
#[derive(Clone)]
pub enum Payload {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Cons(Rc<Cons>),
    Code(Code),
    Callable(Rc<Callable>),
    Composite(Rc<Composite>),
    Opaque(Rc<dyn Any>),
}

/// One immutable runtime value.
#[derive(Clone)]
pub struct TypedValue {
    domain: Rc<TypeDomain>,
    kind: Kind,
    payload: Payload,
}

impl TypedValue {
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn domain(&self) -> &Rc<TypeDomain> {
        &self.domain
    }

    pub fn kind_name(&self) -> Rc<str> {
        self.domain.kind_name(self.kind)
    }

    /// Composite payload, without a kind check against a particular domain.
    pub fn as_composite(&self) -> Option<&Rc<Composite>> {
        match &self.payload {
            Payload::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Source-like rendering: strings are quoted.
    pub fn repr(&self) -> String {
        match &self.payload {
            Payload::Str(s) => format!("{:?}", &**s),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Null => f.write_str("null"),
            Payload::Bool(b) => write!(f, "{b}"),
            Payload::Int(n) => write!(f, "{n}"),
            Payload::Float(x) => write!(f, "{x:?}"),
            Payload::Str(s) => f.write_str(s),
            Payload::Cons(cell) => write!(f, "({} : {})", cell.car.repr(), cell.cdr.repr()),
            Payload::Code(code) => write!(f, "<code:{}>", code.len()),
            Payload::Callable(callable) => write!(f, "<callable {}>", callable.name()),
            Payload::Composite(composite) => fmt_composite(composite, f),
            Payload::Opaque(_) => write!(f, "<{}>", self.kind_name()),
        }
    }
}

fn fmt_composite(composite: &Composite, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match composite.get_optional(crate::composite::TraitKind::Structured) {
        Some(Capability::Structured(members)) => {
            write!(f, "{}{{", composite.name())?;
            for (i, key) in members.keys().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match members.get(key) {
                    Some(value) => write!(f, "{key}={}", value.repr())?,
                    None => write!(f, "{key}=?")?,
                }
            }
            f.write_str("}")
        }
        _ => write!(f, "<{}>", composite.name()),
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind_name(), self.repr())
    }
}
