//! Runtime pattern matching.
//!
//! `match(...)` clauses compile to pattern literals: code blocks that call
//! the builder primitives `var`, `guarded` and `default` (see
//! `compile::matching`). Building a matcher happens in two passes:
//!
//! 1. `pattern` runs the literal in an isolated top frame. Each `var`
//!    argument is evaluated in a placeholder scope over the pattern
//!    environment, so unbound names come back as placeholder composites.
//! 2. [`Pattern::translate`] turns the resulting values into matchers.
//!
//! `match` then collects the built patterns into a [`MatchingFunction`],
//! which tries them in declaration order on every call.

mod builder;
mod function;
mod pattern;

use std::cell::RefCell;
use std::rc::Rc;

use crate::callable::Callable;
use crate::code::Code;
use crate::compile::{DEFAULT_SYMBOL, GUARDED_SYMBOL, MATCH_SYMBOL, PATTERN_SYMBOL, VAR_SYMBOL};
use crate::composite::{Capability, Composite, TraitKind};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::symbols::SymbolMap;
use crate::value::{TypeDomain, TypedValue};

pub use builder::PatternBuilder;
pub use function::MatchingFunction;
pub use pattern::{MatchContext, Pattern};

/// `guard -> action` pair.
#[derive(Clone, Debug)]
pub struct GuardedPatternClause {
    pub guard: Code,
    pub action: Code,
}

/// One alternative of a matching function.
#[derive(Debug)]
pub enum IPattern {
    Unguarded {
        vars: Vec<Pattern>,
        action: Code,
    },
    Guarded {
        vars: Vec<Pattern>,
        clauses: Vec<GuardedPatternClause>,
        default: Option<Code>,
    },
}

impl IPattern {
    pub fn vars(&self) -> &[Pattern] {
        match self {
            IPattern::Unguarded { vars, .. } | IPattern::Guarded { vars, .. } => vars,
        }
    }

    /// Number of values this alternative consumes.
    pub fn required_args(&self) -> usize {
        self.vars().len()
    }

    /// Try this alternative against `values`.
    ///
    /// Returns the selected action, or `None` when a positional matcher
    /// fails or no guard (and no default) applies. Bindings are written to
    /// `ctx.output` as matching proceeds.
    pub fn match_values(
        &self,
        ctx: &MatchContext<'_>,
        values: &[TypedValue],
    ) -> EvalResult<Option<Code>> {
        for (pattern, value) in self.vars().iter().zip(values) {
            if !pattern.matches(ctx, value)? {
                return Ok(None);
            }
        }

        match self {
            IPattern::Unguarded { action, .. } => Ok(Some(action.clone())),
            IPattern::Guarded {
                clauses, default, ..
            } => {
                for clause in clauses {
                    let mut guard_frame = Frame::protection(ctx.domain, ctx.output);
                    clause.guard.execute(&mut guard_frame)?;
                    let results = guard_frame.into_values();
                    let [result] = results.as_slice() else {
                        return Err(EvalError::GuardArity(results.len()));
                    };
                    if ctx.domain.is_truthy(result) {
                        return Ok(Some(clause.action.clone()));
                    }
                }
                Ok(default.clone())
            }
        }
    }
}

/// Install `match` and `pattern` into `globals`.
///
/// Pattern literals resolve names through `pattern_env`; anything unbound
/// there becomes a placeholder.
pub fn register_symbols(
    domain: &Rc<TypeDomain>,
    globals: &SymbolMap,
    pattern_env: &SymbolMap,
) -> EvalResult<()> {
    let env = pattern_env.clone();
    let pattern = Callable::fixed(PATTERN_SYMBOL, 1, 1, move |frame| {
        let literal = frame.stack_mut().pop()?;
        let code = frame.domain().as_code(&literal, PATTERN_SYMBOL)?.clone();
        let built = build_pattern(frame.domain(), &env, &code)?;
        tracing::debug!(
            args = built.required_args(),
            guarded = matches!(built, IPattern::Guarded { .. }),
            "built pattern"
        );
        let value = frame.domain().composite(Composite::single(
            PATTERN_SYMBOL,
            Capability::Pattern(Rc::new(built)),
        ));
        frame.stack_mut().push(value);
        Ok(())
    });
    globals.put_value(PATTERN_SYMBOL, domain.callable(pattern))?;

    let matcher = Callable::single_return(MATCH_SYMBOL, None, |frame, args| {
        let argc = args.ok_or_else(|| EvalError::MissingArgumentCount(MATCH_SYMBOL.to_string()))?;
        let values = frame.stack_mut().pop_n(argc)?;
        let patterns = values
            .iter()
            .map(|value| {
                let composite = frame.domain().as_composite(value, MATCH_SYMBOL)?;
                match composite.get(TraitKind::Pattern)? {
                    Capability::Pattern(pattern) => Ok(Rc::clone(pattern)),
                    _ => Err(EvalError::MalformedPattern(format!(
                        "`{}` is not a pattern",
                        composite.name()
                    ))),
                }
            })
            .collect::<EvalResult<Vec<_>>>()?;
        tracing::debug!(alternatives = patterns.len(), "created matching function");
        let function = MatchingFunction::new(frame.symbols().clone(), patterns);
        Ok(frame.domain().callable(Callable::dynamic(function)))
    });
    globals.put_value(MATCH_SYMBOL, domain.callable(matcher))?;

    Ok(())
}

/// Run a pattern literal against fresh builder primitives.
fn build_pattern(
    domain: &Rc<TypeDomain>,
    pattern_env: &SymbolMap,
    code: &Code,
) -> EvalResult<IPattern> {
    let builder = Rc::new(RefCell::new(PatternBuilder::default()));
    let mut frame = Frame::top(domain);
    install_builder_symbols(domain, frame.symbols(), pattern_env, &builder)?;

    code.execute(&mut frame)?;
    let leftover = frame.stack().len();
    if leftover != 0 {
        return Err(EvalError::MalformedPattern(format!(
            "{leftover} value(s) left on stack after pattern definition"
        )));
    }
    drop(frame);

    builder.take().build()
}

fn install_builder_symbols(
    domain: &Rc<TypeDomain>,
    scope: &SymbolMap,
    pattern_env: &SymbolMap,
    builder: &Rc<RefCell<PatternBuilder>>,
) -> EvalResult<()> {
    let env = pattern_env.clone();
    let state = Rc::clone(builder);
    let var = Callable::fixed(VAR_SYMBOL, 1, 0, move |frame| {
        let literal = frame.stack_mut().pop()?;
        let code = frame.domain().as_code(&literal, VAR_SYMBOL)?.clone();

        let mut placeholder_frame = Frame::new(Rc::clone(frame.domain()), SymbolMap::placeholders(&env));
        code.execute(&mut placeholder_frame)?;
        let values = placeholder_frame.into_values();
        let [value] = values.as_slice() else {
            return Err(EvalError::MalformedPattern(format!(
                "pattern argument produced {} value(s), expected one",
                values.len()
            )));
        };
        let pattern = Pattern::translate(value);
        tracing::trace!(%pattern, "pattern var");
        state.borrow_mut().add_var(pattern)
    });
    scope.put_value(VAR_SYMBOL, domain.callable(var))?;

    let state = Rc::clone(builder);
    let guarded = Callable::fixed(GUARDED_SYMBOL, 2, 0, move |frame| {
        let action = frame.stack_mut().pop()?;
        let guard = frame.stack_mut().pop()?;
        let action = frame.domain().as_code(&action, GUARDED_SYMBOL)?.clone();
        let guard = frame.domain().as_code(&guard, GUARDED_SYMBOL)?.clone();
        state.borrow_mut().add_guarded(guard, action)
    });
    scope.put_value(GUARDED_SYMBOL, domain.callable(guarded))?;

    let state = Rc::clone(builder);
    let default = Callable::fixed(DEFAULT_SYMBOL, 1, 0, move |frame| {
        let action = frame.stack_mut().pop()?;
        let action = frame.domain().as_code(&action, DEFAULT_SYMBOL)?.clone();
        state.borrow_mut().set_default(action)
    });
    scope.put_value(DEFAULT_SYMBOL, domain.callable(default))?;

    Ok(())
}
