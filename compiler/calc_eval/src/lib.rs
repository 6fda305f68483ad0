//! Compiler and stack-machine evaluator for calc.
//!
//! Syntax trees from `calc_parse` are flattened into [`Code`] blocks by the
//! [`Compiler`]; code runs on a [`Frame`] (value stack plus symbol scope).
//! The [`Interpreter`] wires a type domain, the global scope, the builtin
//! library and the pattern engine together.
//!
//! # Modules
//!
//! - `value`: type domain, kinds, typed values
//! - `composite`: capability-trait values, records
//! - `symbols`: chained scopes
//! - `callable`: calling conventions and closures
//! - `code`: instructions and execution
//! - `compile`: syntax tree lowering
//! - `matching`: runtime pattern matching
//! - `builtins`: the prelude

mod builtins;
mod callable;
mod code;
mod compile;
mod composite;
mod errors;
mod frame;
mod interpreter;
mod matching;
mod operators;
mod print_handler;
mod record;
mod stack;
mod symbols;
mod value;

pub use builtins::install_prelude;
pub use callable::{
    call_value, validate_returns, Callable, Closure, DynamicCallable, FixedCallable,
    SingleReturnCallable,
};
pub use code::{Code, Instruction};
pub use compile::{Compiler, Flatten, APPLY_SYMBOL, MATCH_SYMBOL, PATTERN_SYMBOL, WITH_SYMBOL};
pub use composite::{Capability, Composite, CompositeBuilder, Decomposable, Structured, TraitKind};
pub use errors::{CompileError, EvalError, EvalResult};
pub use frame::Frame;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use matching::{
    register_symbols, GuardedPatternClause, IPattern, MatchContext, MatchingFunction, Pattern,
    PatternBuilder,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandler,
    SharedPrintHandler,
};
pub use record::{RecordType, RecordValue};
pub use stack::Stack;
pub use symbols::{ScopeKind, Symbol, SymbolMap};
pub use value::{Cons, Kind, Payload, TruthinessFn, TypeDomain, TypedValue};
