//! Accumulates the pieces of one pattern literal.

use crate::code::Code;
use crate::errors::{EvalError, EvalResult};

use super::{GuardedPatternClause, IPattern, Pattern};

/// State shared by `var`, `guarded` and `default` while a pattern literal
/// runs.
#[derive(Default)]
pub struct PatternBuilder {
    vars: Vec<Pattern>,
    clauses: Vec<GuardedPatternClause>,
    default: Option<Code>,
}

impl PatternBuilder {
    pub fn add_var(&mut self, pattern: Pattern) -> EvalResult<()> {
        if !self.clauses.is_empty() || self.default.is_some() {
            return Err(malformed("variable pattern after action"));
        }
        self.vars.push(pattern);
        Ok(())
    }

    pub fn add_guarded(&mut self, guard: Code, action: Code) -> EvalResult<()> {
        if self.default.is_some() {
            return Err(malformed("guarded clause after default action"));
        }
        self.clauses.push(GuardedPatternClause { guard, action });
        Ok(())
    }

    pub fn set_default(&mut self, action: Code) -> EvalResult<()> {
        if self.default.is_some() {
            return Err(malformed("default action defined twice"));
        }
        self.default = Some(action);
        Ok(())
    }

    pub fn build(self) -> EvalResult<IPattern> {
        if self.clauses.is_empty() {
            let action = self
                .default
                .ok_or_else(|| malformed("pattern without guarded clauses needs a default action"))?;
            Ok(IPattern::Unguarded {
                vars: self.vars,
                action,
            })
        } else {
            Ok(IPattern::Guarded {
                vars: self.vars,
                clauses: self.clauses,
                default: self.default,
            })
        }
    }
}

fn malformed(reason: &str) -> EvalError {
    EvalError::MalformedPattern(reason.to_string())
}
