//! Match expression lowering.
//!
//! Each clause becomes a pattern-literal code block run by `pattern`:
//!
//! ```text
//! (x, y) -> x + y            push {x}, call var(1 -> 0)
//!                            push {y}, call var(1 -> 0)
//!                            push {x + y}, call default(1 -> 0)
//!
//! (n) \ n > 0 -> 1 \ 0       push {n}, call var(1 -> 0)
//!                            push {n > 0}, push {1}, call guarded(2 -> 0)
//!                            push {0}, call default(1 -> 0)
//! ```

use calc_ir::{BinaryOp, ExprKind, ExprNode};

use super::{Compiler, Output};
use crate::code::{Code, Instruction};
use crate::errors::CompileError;

pub const MATCH_SYMBOL: &str = "match";
pub const PATTERN_SYMBOL: &str = "pattern";
pub const VAR_SYMBOL: &str = "var";
pub const GUARDED_SYMBOL: &str = "guarded";
pub const DEFAULT_SYMBOL: &str = "default";

impl Compiler {
    pub(super) fn flatten_match(
        &self,
        clauses: &[ExprNode],
        output: &mut Output,
    ) -> Result<(), CompileError> {
        for clause in clauses {
            let code = self.compile_clause(clause)?;
            output.push(Instruction::Push(self.domain.code(code)));
            output.push(Instruction::call(PATTERN_SYMBOL, 1, 1));
        }
        output.push(Instruction::call(MATCH_SYMBOL, clauses.len(), 1));
        Ok(())
    }

    fn compile_clause(&self, clause: &ExprNode) -> Result<Code, CompileError> {
        let Some((op, left, right)) = clause.as_binary() else {
            return Err(CompileError::MalformedMatchClause {
                span: clause.span,
                reason: "expected `(patterns) -> action` or `(patterns) \\ guard -> action`",
            });
        };
        let ExprKind::Bracket(patterns) = &left.kind else {
            return Err(CompileError::MalformedMatchClause {
                span: left.span,
                reason: "patterns must be enclosed in parentheses",
            });
        };

        let mut output = Vec::new();
        for pattern in patterns {
            self.push_code(pattern, &mut output)?;
            output.push(Instruction::call(VAR_SYMBOL, 1, 0));
        }

        match op {
            BinaryOp::Lambda => self.emit_default(right, &mut output)?,
            BinaryOp::Split => self.extract_guards(right, &mut output)?,
            _ => {
                return Err(CompileError::MalformedMatchClause {
                    span: clause.span,
                    reason: "expected `->` or `\\` after patterns",
                })
            }
        }

        Ok(Code::new(output))
    }

    /// `guard -> action \ guard -> action \ default`; the default is optional.
    fn extract_guards(&self, node: &ExprNode, output: &mut Output) -> Result<(), CompileError> {
        match node.as_binary() {
            Some((BinaryOp::Split, clause, rest)) => {
                let Some((BinaryOp::Lambda, guard, action)) = clause.as_binary() else {
                    return Err(CompileError::MalformedMatchClause {
                        span: clause.span,
                        reason: "expected `guard -> action` before `\\`",
                    });
                };
                self.emit_guarded(guard, action, output)?;
                self.extract_guards(rest, output)
            }
            Some((BinaryOp::Lambda, guard, action)) => self.emit_guarded(guard, action, output),
            _ => self.emit_default(node, output),
        }
    }

    fn emit_guarded(
        &self,
        guard: &ExprNode,
        action: &ExprNode,
        output: &mut Output,
    ) -> Result<(), CompileError> {
        self.push_code(guard, output)?;
        self.push_code(action, output)?;
        output.push(Instruction::call(GUARDED_SYMBOL, 2, 0));
        Ok(())
    }

    fn emit_default(&self, action: &ExprNode, output: &mut Output) -> Result<(), CompileError> {
        self.push_code(action, output)?;
        output.push(Instruction::call(DEFAULT_SYMBOL, 1, 0));
        Ok(())
    }
}
