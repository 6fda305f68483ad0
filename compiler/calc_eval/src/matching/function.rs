//! Multi-clause dispatch built by `match`.

use std::rc::Rc;

use crate::callable::{validate_returns, DynamicCallable};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::symbols::SymbolMap;

use super::{IPattern, MatchContext};

/// Ordered alternatives plus the scope `match` was called in.
pub struct MatchingFunction {
    scope: SymbolMap,
    patterns: Vec<Rc<IPattern>>,
}

impl MatchingFunction {
    pub fn new(scope: SymbolMap, patterns: Vec<Rc<IPattern>>) -> Self {
        MatchingFunction { scope, patterns }
    }

    pub fn patterns(&self) -> &[Rc<IPattern>] {
        &self.patterns
    }
}

impl DynamicCallable for MatchingFunction {
    fn name(&self) -> &str {
        "match"
    }

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        let domain = Rc::clone(frame.domain());
        let env = SymbolMap::protection(&self.scope);

        for (index, pattern) in self.patterns.iter().enumerate() {
            let arity = pattern.required_args();
            match args {
                Some(argc) if argc != arity => continue,
                None if arity > frame.stack().len() => continue,
                _ => {}
            }

            let values = frame.stack().top(arity)?.to_vec();
            let bindings = SymbolMap::local(&self.scope);
            let ctx = MatchContext {
                domain: &domain,
                env: &env,
                output: &bindings,
            };
            let Some(action) = pattern.match_values(&ctx, &values)? else {
                continue;
            };

            tracing::debug!(alternative = index, arity, "match selected alternative");
            frame.stack_mut().pop_n(arity)?;

            let mut action_frame = Frame::closure(&domain, &bindings);
            action.execute(&mut action_frame)?;
            let results = action_frame.into_values();
            validate_returns(rets, results.len())?;
            frame.stack_mut().extend(results);
            return Ok(());
        }

        tracing::debug!(?args, alternatives = self.patterns.len(), "no matching alternative");
        Err(EvalError::NoMatchingAlternative)
    }
}
