//! Error types for compilation and evaluation.

use calc_ir::Span;

/// Result of an evaluation step.
pub type EvalResult<T> = Result<T, EvalError>;

/// Runtime failure.
///
/// Pattern non-matches are not errors; they surface as `Ok(None)` /
/// `Ok(false)` inside the pattern engine. Everything here aborts the
/// current evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("{context}: expected {expected}, got {got}")]
    TypeMismatch {
        context: String,
        expected: String,
        got: String,
    },

    #[error("unknown value kind #{0}")]
    UnknownKind(u16),

    #[error("value kind `{0}` is already registered")]
    KindAlreadyRegistered(String),

    #[error("payload does not fit kind `{0}`")]
    PayloadMismatch(String),

    #[error("stack underflow: needed {needed} value(s), have {available}")]
    StackUnderflow { needed: usize, available: usize },

    #[error("has {actual} result(s) but expected {expected}")]
    StackValidation { expected: usize, actual: usize },

    #[error("`{name}` takes {expected} argument(s) but was called with {actual}")]
    ArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{name}` returns {expected} value(s) but caller expects {actual}")]
    ReturnCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{0}` requires an explicit argument count")]
    MissingArgumentCount(String),

    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),

    #[error("value of kind `{0}` is not callable")]
    NotCallable(String),

    #[error("can't define `{0}` in a protected scope")]
    ProtectedScopeWrite(String),

    #[error("composite `{composite}` has no {trait_name} trait")]
    MissingTrait {
        composite: String,
        trait_name: &'static str,
    },

    #[error("`{composite}` has no member `{member}`")]
    NoSuchMember { composite: String, member: String },

    #[error("constructor `{ctor}` decomposed into {actual} value(s), expected {expected}")]
    DecomposableContract {
        ctor: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown constructor `{0}` in pattern")]
    UnknownConstructor(String),

    #[error("`{0}` is not a decomposable constructor")]
    NotDecomposable(String),

    #[error("guard left {0} value(s) on the stack, expected exactly one")]
    GuardArity(usize),

    #[error("can't find matching variant")]
    NoMatchingAlternative,

    #[error("malformed pattern: {0}")]
    MalformedPattern(String),

    #[error("integer overflow in `{0}`")]
    IntegerOverflow(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid operation: {left} {op} {right}")]
    InvalidOperation {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("invalid operation: {op}{operand}")]
    InvalidUnaryOperation { op: &'static str, operand: String },

    #[error("can't convert {value} to {target}")]
    Conversion { value: String, target: &'static str },
}

/// Failure while flattening a syntax tree into instructions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("lambda parameters must be identifiers at {span}")]
    InvalidLambdaParams { span: Span },

    #[error("`\\` is only valid inside match clauses at {span}")]
    SplitOutsideMatch { span: Span },

    #[error("malformed match clause at {span}: {reason}")]
    MalformedMatchClause { span: Span, reason: &'static str },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::InvalidLambdaParams { span }
            | CompileError::SplitOutsideMatch { span }
            | CompileError::MalformedMatchClause { span, .. } => *span,
        }
    }
}
