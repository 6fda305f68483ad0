//! Flattens syntax trees into instruction sequences.
//!
//! Parents flatten their children in a fixed order, then append their own
//! instructions. Sugared forms are expanded here by node shape:
//!
//! | source | instructions |
//! |---|---|
//! | `f(a, b)` | `a, b, call f(2)` |
//! | `g(a)(b)` | `a, call g(1), b, call apply(2)` |
//! | `o.m` | `o, push "m", dot` |
//! | `o.m(a)` | `o, push "m", dot, a, call apply(2)` |
//! | `o.{ .. }` | `o, push <code>, call with(2)` |
//! | `(a, b) -> e` | `closure(a, b)` |
//! | `match(..)` | per clause `push <code>, call pattern(1)`, then `call match(n)` |

mod matching;

use std::rc::Rc;

use calc_ir::{BinaryOp, ExprKind, ExprNode, Literal};

use crate::code::{Code, Instruction};
use crate::errors::CompileError;
use crate::value::{TypeDomain, TypedValue};

pub use matching::{DEFAULT_SYMBOL, GUARDED_SYMBOL, MATCH_SYMBOL, PATTERN_SYMBOL, VAR_SYMBOL};

/// Symbol called to invoke a computed target.
pub const APPLY_SYMBOL: &str = "apply";
/// Symbol called for `.{ .. }` blocks.
pub const WITH_SYMBOL: &str = "with";

/// Output of flattening.
pub type Output = Vec<Instruction>;

/// Syntax node that can emit instructions.
pub trait Flatten {
    fn flatten(&self, compiler: &Compiler, output: &mut Output) -> Result<(), CompileError>;
}

/// Compiles syntax into `Code` for one type domain.
pub struct Compiler {
    domain: Rc<TypeDomain>,
}

impl Compiler {
    pub fn new(domain: Rc<TypeDomain>) -> Self {
        Compiler { domain }
    }

    pub fn domain(&self) -> &Rc<TypeDomain> {
        &self.domain
    }

    /// Compile a node into a standalone code block.
    pub fn compile(&self, node: &impl Flatten) -> Result<Code, CompileError> {
        let mut output = Vec::new();
        node.flatten(self, &mut output)?;
        tracing::debug!(instructions = output.len(), "compiled code block");
        Ok(Code::new(output))
    }

    fn literal(&self, literal: &Literal) -> TypedValue {
        match literal {
            Literal::Null => self.domain.null(),
            Literal::Bool(b) => self.domain.bool(*b),
            Literal::Int(n) => self.domain.int(*n),
            Literal::Float(f) => self.domain.float(*f),
            Literal::Str(s) => self.domain.string(s.as_str()),
        }
    }

    fn push_string(&self, s: &str, output: &mut Output) {
        output.push(Instruction::Push(self.domain.string(s)));
    }

    fn push_code(&self, node: &ExprNode, output: &mut Output) -> Result<(), CompileError> {
        let code = self.compile(node)?;
        output.push(Instruction::Push(self.domain.code(code)));
        Ok(())
    }

    fn flatten_all(&self, nodes: &[ExprNode], output: &mut Output) -> Result<(), CompileError> {
        nodes.iter().try_for_each(|node| node.flatten(self, output))
    }

    /// `left.right`, dispatched on the shape of `right`.
    fn flatten_dot(
        &self,
        left: &ExprNode,
        right: &ExprNode,
        output: &mut Output,
    ) -> Result<(), CompileError> {
        match &right.kind {
            ExprKind::Call { target, args } => {
                self.flatten_dot(left, target, output)?;
                self.flatten_all(args, output)?;
                output.push(Instruction::call(APPLY_SYMBOL, args.len() + 1, 1));
            }
            ExprKind::SymbolCall { name, args } => {
                left.flatten(self, output)?;
                self.push_string(name, output);
                output.push(Instruction::Binary(BinaryOp::Dot));
                self.flatten_all(args, output)?;
                output.push(Instruction::call(APPLY_SYMBOL, args.len() + 1, 1));
            }
            ExprKind::SymbolGet(name) => {
                left.flatten(self, output)?;
                self.push_string(name, output);
                output.push(Instruction::Binary(BinaryOp::Dot));
            }
            ExprKind::RawCode(body) => {
                left.flatten(self, output)?;
                self.push_code(body, output)?;
                output.push(Instruction::call(WITH_SYMBOL, 2, 1));
            }
            _ => {
                left.flatten(self, output)?;
                right.flatten(self, output)?;
                output.push(Instruction::Binary(BinaryOp::Dot));
            }
        }
        Ok(())
    }

    fn flatten_lambda(
        &self,
        params: &ExprNode,
        body: &ExprNode,
        output: &mut Output,
    ) -> Result<(), CompileError> {
        let names: Vec<Rc<str>> = match &params.kind {
            ExprKind::SymbolGet(name) => vec![Rc::from(name.as_str())],
            ExprKind::Bracket(items) => items
                .iter()
                .map(|item| item.as_symbol().map(Rc::from))
                .collect::<Option<_>>()
                .ok_or(CompileError::InvalidLambdaParams { span: params.span })?,
            _ => return Err(CompileError::InvalidLambdaParams { span: params.span }),
        };
        let body = self.compile(body)?;
        output.push(Instruction::Closure {
            params: names.into(),
            body,
        });
        Ok(())
    }
}

impl Flatten for ExprNode {
    fn flatten(&self, compiler: &Compiler, output: &mut Output) -> Result<(), CompileError> {
        match &self.kind {
            ExprKind::Literal(literal) => output.push(Instruction::Push(compiler.literal(literal))),
            ExprKind::SymbolGet(name) => output.push(Instruction::Get(Rc::from(name.as_str()))),
            ExprKind::SymbolCall { name, args } => {
                compiler.flatten_all(args, output)?;
                output.push(Instruction::call(name.as_str(), args.len(), 1));
            }
            ExprKind::Call { target, args } => {
                target.flatten(compiler, output)?;
                compiler.flatten_all(args, output)?;
                output.push(Instruction::call(APPLY_SYMBOL, args.len() + 1, 1));
            }
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::Dot => compiler.flatten_dot(left, right, output)?,
                BinaryOp::Lambda => compiler.flatten_lambda(left, right, output)?,
                BinaryOp::Split => return Err(CompileError::SplitOutsideMatch { span: self.span }),
                _ => {
                    left.flatten(compiler, output)?;
                    right.flatten(compiler, output)?;
                    output.push(Instruction::Binary(*op));
                }
            },
            ExprKind::Unary { op, operand } => {
                operand.flatten(compiler, output)?;
                output.push(Instruction::Unary(*op));
            }
            ExprKind::Bracket(items) | ExprKind::Sequence(items) => {
                compiler.flatten_all(items, output)?;
            }
            ExprKind::RawCode(body) => compiler.push_code(body, output)?,
            ExprKind::Match(clauses) => compiler.flatten_match(clauses, output)?,
            ExprKind::Assign { name, value } => {
                value.flatten(compiler, output)?;
                output.push(Instruction::Define(Rc::from(name.as_str())));
            }
        }
        Ok(())
    }
}
