//! Driver for the calc language.
//!
//! Ties the pipeline together (source -> syntax tree -> code -> values) and
//! hosts the `calc` command handlers.

pub mod commands;

use std::sync::Once;

use calc_eval::{Code, CompileError, EvalError, Interpreter, TypedValue};
use calc_ir::Span;
use calc_parse::ParseError;

/// Any failure between source text and final values.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
}

impl CalcError {
    /// Source location, when the failing phase tracks one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CalcError::Parse(error) => Some(error.span()),
            CalcError::Compile(error) => Some(error.span()),
            CalcError::Eval(_) => None,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Parse and compile `source` for `interpreter`.
pub fn compile_source(interpreter: &Interpreter, source: &str) -> Result<Code, CalcError> {
    let ast = calc_parse::parse(source)?;
    Ok(interpreter.compile(&ast)?)
}

/// Parse, compile and run `source`; returns everything left on the stack.
pub fn run_source(interpreter: &Interpreter, source: &str) -> Result<Vec<TypedValue>, CalcError> {
    let code = compile_source(interpreter, source)?;
    Ok(interpreter.execute(&code)?)
}

/// One-based line and column of a byte offset.
pub fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = usize::try_from(offset).map_or(source.len(), |o| o.min(source.len()));
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before, |newline| &before[newline + 1..])
        .chars()
        .count()
        + 1;
    (line, column)
}
