//! Positional matchers.

use std::fmt;
use std::rc::Rc;

use crate::composite::{Capability, TraitKind};
use crate::errors::{EvalError, EvalResult};
use crate::symbols::{Symbol, SymbolMap};
use crate::value::{Kind, Payload, TypeDomain, TypedValue};

/// Placeholder name that matches anything without binding.
pub const WILDCARD: &str = "_";

/// Matcher for one argument position.
#[derive(Clone)]
pub enum Pattern {
    Any,
    BindName(Rc<str>),
    MatchExact(TypedValue),
    MatchCons {
        car: Box<Pattern>,
        cdr: Box<Pattern>,
    },
    MatchDecomposable {
        ctor: Rc<str>,
        args: Vec<Pattern>,
    },
}

/// Where a match reads constructors from and writes bindings to.
pub struct MatchContext<'a> {
    pub domain: &'a Rc<TypeDomain>,
    /// Protected view of the defining scope; constructors resolve here.
    pub env: &'a SymbolMap,
    /// Local layer receiving bound names.
    pub output: &'a SymbolMap,
}

impl Pattern {
    /// Turn the value a pattern literal evaluated to into a matcher.
    pub fn translate(value: &TypedValue) -> Pattern {
        match value.payload() {
            Payload::Composite(composite) => {
                if let Some(Capability::VarPlaceholder(name)) =
                    composite.get_optional(TraitKind::VarPlaceholder)
                {
                    if &**name == WILDCARD {
                        return Pattern::Any;
                    }
                    return Pattern::BindName(Rc::clone(name));
                }
                if let Some(Capability::CtorPlaceholder { name, args }) =
                    composite.get_optional(TraitKind::CtorPlaceholder)
                {
                    return Pattern::MatchDecomposable {
                        ctor: Rc::clone(name),
                        args: args.iter().map(Pattern::translate).collect(),
                    };
                }
                Pattern::MatchExact(value.clone())
            }
            Payload::Cons(cell) => Pattern::MatchCons {
                car: Box::new(Pattern::translate(&cell.car)),
                cdr: Box::new(Pattern::translate(&cell.cdr)),
            },
            _ => Pattern::MatchExact(value.clone()),
        }
    }

    /// `Ok(false)` is an ordinary non-match; errors are fatal.
    pub fn matches(&self, ctx: &MatchContext<'_>, value: &TypedValue) -> EvalResult<bool> {
        match self {
            Pattern::Any => Ok(true),
            Pattern::BindName(name) => {
                ctx.output.put_value(Rc::clone(name), value.clone())?;
                Ok(true)
            }
            Pattern::MatchExact(expected) => Ok(ctx.domain.equals(expected, value)),
            Pattern::MatchCons { car, cdr } => match value.payload() {
                Payload::Cons(cell) if ctx.domain.is(value, Kind::CONS) => {
                    Ok(car.matches(ctx, &cell.car)? && cdr.matches(ctx, &cell.cdr)?)
                }
                _ => Ok(false),
            },
            Pattern::MatchDecomposable { ctor, args } => {
                Self::match_decomposable(ctx, ctor, args, value)
            }
        }
    }

    fn match_decomposable(
        ctx: &MatchContext<'_>,
        ctor: &Rc<str>,
        args: &[Pattern],
        value: &TypedValue,
    ) -> EvalResult<bool> {
        let constructor = match ctx.env.get(ctor) {
            Some(Symbol::Value(constructor)) => constructor,
            Some(Symbol::Placeholder(_)) | None => {
                return Err(EvalError::UnknownConstructor(ctor.to_string()))
            }
        };
        let decomposable = match constructor
            .as_composite()
            .and_then(|composite| composite.get_optional(TraitKind::Decomposable))
        {
            Some(Capability::Decomposable(decomposable)) => Rc::clone(decomposable),
            _ => return Err(EvalError::NotDecomposable(ctor.to_string())),
        };

        let Some(parts) = decomposable.try_decompose(value, args.len()) else {
            return Ok(false);
        };
        if parts.len() != args.len() {
            return Err(EvalError::DecomposableContract {
                ctor: ctor.to_string(),
                expected: args.len(),
                actual: parts.len(),
            });
        }

        for (pattern, part) in args.iter().zip(&parts) {
            if !pattern.matches(ctx, part)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any => f.write_str(WILDCARD),
            Pattern::BindName(name) => f.write_str(name),
            Pattern::MatchExact(value) => f.write_str(&value.repr()),
            Pattern::MatchCons { car, cdr } => write!(f, "({car} : {cdr})"),
            Pattern::MatchDecomposable { ctor, args } => {
                write!(f, "{ctor}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
