//! Flat instruction sequences and their execution.

use std::fmt;
use std::rc::Rc;

use calc_ir::{BinaryOp, UnaryOp};

use crate::callable::{Callable, Closure};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::TypedValue;

/// One step of a compiled program.
#[derive(Clone)]
pub enum Instruction {
    /// Push a constant.
    Push(TypedValue),
    /// Push the value of a symbol.
    Get(Rc<str>),
    /// Call a symbol with optional argument and return counts.
    Call {
        name: Rc<str>,
        args: Option<usize>,
        rets: Option<usize>,
    },
    /// Pop two operands, push the result.
    Binary(BinaryOp),
    /// Pop one operand, push the result.
    Unary(UnaryOp),
    /// Push a lambda capturing the current scope.
    Closure {
        params: Rc<[Rc<str>]>,
        body: Code,
    },
    /// Pop a value and bind it in the current scope.
    Define(Rc<str>),
}

impl Instruction {
    pub fn call(name: impl Into<Rc<str>>, args: usize, rets: usize) -> Self {
        Instruction::Call {
            name: name.into(),
            args: Some(args),
            rets: Some(rets),
        }
    }

    fn execute(&self, frame: &mut Frame) -> EvalResult<()> {
        match self {
            Instruction::Push(value) => frame.stack_mut().push(value.clone()),
            Instruction::Get(name) => {
                let symbol = frame
                    .symbols()
                    .get(name)
                    .ok_or_else(|| EvalError::UndefinedSymbol(name.to_string()))?;
                let value = symbol.get(frame.domain());
                frame.stack_mut().push(value);
            }
            Instruction::Call { name, args, rets } => {
                let symbol = frame
                    .symbols()
                    .get(name)
                    .ok_or_else(|| EvalError::UndefinedSymbol(name.to_string()))?;
                symbol.call(frame, *args, *rets)?;
            }
            Instruction::Binary(op) => {
                let right = frame.stack_mut().pop()?;
                let left = frame.stack_mut().pop()?;
                let result = evaluate_binary(frame.domain(), *op, &left, &right)?;
                frame.stack_mut().push(result);
            }
            Instruction::Unary(op) => {
                let operand = frame.stack_mut().pop()?;
                let result = evaluate_unary(frame.domain(), *op, &operand)?;
                frame.stack_mut().push(result);
            }
            Instruction::Closure { params, body } => {
                let closure = Closure::new(Rc::clone(params), body.clone(), frame.symbols().clone());
                let value = frame.domain().callable(Callable::dynamic(closure));
                frame.stack_mut().push(value);
            }
            Instruction::Define(name) => {
                let value = frame.stack_mut().pop()?;
                frame.symbols().put_value(Rc::clone(name), value)?;
            }
        }
        Ok(())
    }
}

fn binary_mnemonic(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "add",
        BinaryOp::Sub => "sub",
        BinaryOp::Mul => "mul",
        BinaryOp::Div => "div",
        BinaryOp::Mod => "mod",
        BinaryOp::Eq => "eq",
        BinaryOp::NotEq => "ne",
        BinaryOp::Lt => "lt",
        BinaryOp::LtEq => "le",
        BinaryOp::Gt => "gt",
        BinaryOp::GtEq => "ge",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Cons => "cons",
        BinaryOp::Dot => "dot",
        BinaryOp::Lambda => "lambda",
        BinaryOp::Split => "split",
    }
}

fn fmt_count(count: Option<usize>) -> String {
    count.map_or_else(|| "?".to_string(), |n| n.to_string())
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(value) => write!(f, "push {}", value.repr()),
            Instruction::Get(name) => write!(f, "get {name}"),
            Instruction::Call {
                name,
                args,
                rets: Some(1),
            } => write!(f, "call {name}({})", fmt_count(*args)),
            Instruction::Call { name, args, rets } => {
                write!(f, "call {name}({} -> {})", fmt_count(*args), fmt_count(*rets))
            }
            Instruction::Binary(op) => f.write_str(binary_mnemonic(*op)),
            Instruction::Unary(UnaryOp::Neg) => f.write_str("neg"),
            Instruction::Unary(UnaryOp::Not) => f.write_str("not"),
            Instruction::Closure { params, body } => {
                write!(f, "closure({}) <code:{}>", params.join(", "), body.len())
            }
            Instruction::Define(name) => write!(f, "define {name}"),
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Compiled instruction sequence. Cheap to clone; compiled once, run many
/// times.
#[derive(Clone, Default)]
pub struct Code(Rc<[Instruction]>);

impl Code {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Code(instructions.into())
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ptr_eq(&self, other: &Code) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Run every instruction against `frame`.
    pub fn execute(&self, frame: &mut Frame) -> EvalResult<()> {
        for instruction in self.0.iter() {
            tracing::trace!(%instruction, depth = frame.stack().len(), "exec");
            instruction.execute(frame)?;
        }
        Ok(())
    }

    /// One line per instruction; nested code values are listed after their
    /// parent, indented.
    pub fn disassemble(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.disassemble_into(0, &mut lines);
        lines
    }

    fn disassemble_into(&self, indent: usize, lines: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        for instruction in self.0.iter() {
            lines.push(format!("{pad}{instruction}"));
            match instruction {
                Instruction::Push(value) => {
                    if let crate::value::Payload::Code(code) = value.payload() {
                        code.disassemble_into(indent + 1, lines);
                    }
                }
                Instruction::Closure { body, .. } => body.disassemble_into(indent + 1, lines),
                _ => {}
            }
        }
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
