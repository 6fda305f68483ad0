//! Callable dispatch.
//!
//! Every call site carries an optional argument count and an optional
//! return count. How strictly those are enforced depends on the callable:
//!
//! - [`FixedCallable`]: exact arity on both sides; the stack delta is checked
//!   after the body runs.
//! - [`SingleReturnCallable`]: optional input arity, exactly one result.
//! - [`DynamicCallable`]: both counts optional; implementations validate
//!   their own results with [`validate_returns`].

use std::fmt;
use std::rc::Rc;

use crate::code::Code;
use crate::composite::{Capability, TraitKind};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::symbols::SymbolMap;
use crate::value::{Payload, TypedValue};

/// Body of a fixed-arity native: pops its arguments, pushes its results.
pub type FixedBody = dyn Fn(&mut Frame) -> EvalResult<()>;

/// Body of a single-return native: receives the effective argument count,
/// pops that many values and returns the result.
pub type SingleReturnBody = dyn Fn(&mut Frame, Option<usize>) -> EvalResult<TypedValue>;

pub struct FixedCallable {
    name: Rc<str>,
    args: usize,
    rets: usize,
    body: Box<FixedBody>,
}

impl FixedCallable {
    pub fn new(
        name: impl Into<Rc<str>>,
        args: usize,
        rets: usize,
        body: impl Fn(&mut Frame) -> EvalResult<()> + 'static,
    ) -> Self {
        FixedCallable {
            name: name.into(),
            args,
            rets,
            body: Box::new(body),
        }
    }

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        if let Some(args) = args.filter(|&args| args != self.args) {
            return Err(EvalError::ArgumentCount {
                name: self.name.to_string(),
                expected: self.args,
                actual: args,
            });
        }
        if let Some(rets) = rets.filter(|&rets| rets != self.rets) {
            return Err(EvalError::ReturnCount {
                name: self.name.to_string(),
                expected: self.rets,
                actual: rets,
            });
        }

        let available = frame.stack().len();
        if available < self.args {
            return Err(EvalError::StackUnderflow {
                needed: self.args,
                available,
            });
        }
        let base = available - self.args;

        (self.body)(frame)?;

        let after = frame.stack().len();
        if after != base + self.rets {
            return Err(EvalError::StackValidation {
                expected: self.rets,
                actual: after.saturating_sub(base),
            });
        }
        Ok(())
    }
}

pub struct SingleReturnCallable {
    name: Rc<str>,
    args: Option<usize>,
    body: Box<SingleReturnBody>,
}

impl SingleReturnCallable {
    pub fn new(
        name: impl Into<Rc<str>>,
        args: Option<usize>,
        body: impl Fn(&mut Frame, Option<usize>) -> EvalResult<TypedValue> + 'static,
    ) -> Self {
        SingleReturnCallable {
            name: name.into(),
            args,
            body: Box::new(body),
        }
    }

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        if let (Some(declared), Some(actual)) = (self.args, args) {
            if declared != actual {
                return Err(EvalError::ArgumentCount {
                    name: self.name.to_string(),
                    expected: declared,
                    actual,
                });
            }
        }
        if let Some(rets) = rets.filter(|&rets| rets != 1) {
            return Err(EvalError::ReturnCount {
                name: self.name.to_string(),
                expected: 1,
                actual: rets,
            });
        }

        let result = (self.body)(frame, args.or(self.args))?;
        frame.stack_mut().push(result);
        Ok(())
    }
}

/// Callable that handles its own arity.
pub trait DynamicCallable {
    fn name(&self) -> &str;

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()>;
}

/// Something that can be invoked from a call instruction.
#[derive(Clone)]
pub enum Callable {
    Fixed(Rc<FixedCallable>),
    SingleReturn(Rc<SingleReturnCallable>),
    Dynamic(Rc<dyn DynamicCallable>),
}

impl Callable {
    pub fn fixed(
        name: impl Into<Rc<str>>,
        args: usize,
        rets: usize,
        body: impl Fn(&mut Frame) -> EvalResult<()> + 'static,
    ) -> Self {
        Callable::Fixed(Rc::new(FixedCallable::new(name, args, rets, body)))
    }

    pub fn single_return(
        name: impl Into<Rc<str>>,
        args: Option<usize>,
        body: impl Fn(&mut Frame, Option<usize>) -> EvalResult<TypedValue> + 'static,
    ) -> Self {
        Callable::SingleReturn(Rc::new(SingleReturnCallable::new(name, args, body)))
    }

    pub fn dynamic(callable: impl DynamicCallable + 'static) -> Self {
        Callable::Dynamic(Rc::new(callable))
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::Fixed(f) => &f.name,
            Callable::SingleReturn(f) => &f.name,
            Callable::Dynamic(f) => f.name(),
        }
    }

    pub fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        match self {
            Callable::Fixed(f) => f.call(frame, args, rets),
            Callable::SingleReturn(f) => f.call(frame, args, rets),
            Callable::Dynamic(f) => f.call(frame, args, rets),
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name())
    }
}

/// Check a produced result count against the caller's declared count.
/// No declared count means the result is trusted.
pub fn validate_returns(expected: Option<usize>, actual: usize) -> EvalResult<()> {
    match expected {
        Some(expected) if expected != actual => {
            Err(EvalError::StackValidation { expected, actual })
        }
        _ => Ok(()),
    }
}

/// Invoke a callable value or a composite with a `Callable` trait.
pub fn call_value(
    frame: &mut Frame,
    value: &TypedValue,
    args: Option<usize>,
    rets: Option<usize>,
) -> EvalResult<()> {
    match value.payload() {
        Payload::Callable(callable) => callable.call(frame, args, rets),
        Payload::Composite(composite) => match composite.get_optional(TraitKind::Callable) {
            Some(Capability::Callable(callable)) => callable.call(frame, args, rets),
            _ => Err(EvalError::NotCallable(composite.name().to_string())),
        },
        _ => Err(EvalError::NotCallable(value.kind_name().to_string())),
    }
}

/// Script lambda: fixed parameter list, body run in a closure frame over
/// the defining scope.
pub struct Closure {
    params: Rc<[Rc<str>]>,
    body: Code,
    scope: SymbolMap,
}

impl Closure {
    pub fn new(params: Rc<[Rc<str>]>, body: Code, scope: SymbolMap) -> Self {
        Closure {
            params,
            body,
            scope,
        }
    }
}

impl DynamicCallable for Closure {
    fn name(&self) -> &str {
        "lambda"
    }

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        let argc = args.unwrap_or(self.params.len());
        if argc != self.params.len() {
            return Err(EvalError::ArgumentCount {
                name: self.name().to_string(),
                expected: self.params.len(),
                actual: argc,
            });
        }

        let values = frame.stack_mut().pop_n(argc)?;
        let mut inner = Frame::closure(frame.domain(), &self.scope);
        for (param, value) in self.params.iter().zip(values) {
            inner.symbols().put_value(Rc::clone(param), value)?;
        }
        self.body.execute(&mut inner)?;

        let results = inner.into_values();
        validate_returns(rets, results.len())?;
        frame.stack_mut().extend(results);
        Ok(())
    }
}
