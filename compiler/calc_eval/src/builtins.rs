//! Builtin library installed into the global scope.

use std::rc::Rc;

use crate::callable::{call_value, validate_returns, Callable, DynamicCallable};
use crate::compile::{APPLY_SYMBOL, WITH_SYMBOL};
use crate::composite::{Capability, TraitKind};
use crate::errors::{EvalError, EvalResult};
use crate::frame::Frame;
use crate::print_handler::SharedPrintHandler;
use crate::record::RecordType;
use crate::symbols::{Symbol, SymbolMap};
use crate::value::{Payload, TypeDomain, TypedValue};

/// Install the prelude into `globals`.
pub fn install_prelude(
    domain: &Rc<TypeDomain>,
    globals: &SymbolMap,
    print_handler: &SharedPrintHandler,
) -> EvalResult<()> {
    let builtins = [
        Callable::dynamic(Apply),
        Callable::fixed(WITH_SYMBOL, 2, 1, with),
        Callable::single_return("record", None, record),
        Callable::fixed("cons", 2, 1, |frame| {
            let cdr = frame.stack_mut().pop()?;
            let car = frame.stack_mut().pop()?;
            let cell = frame.domain().cons(car, cdr);
            frame.stack_mut().push(cell);
            Ok(())
        }),
        Callable::fixed("car", 1, 1, |frame| cell_part(frame, "car", |cell| &cell.car)),
        Callable::fixed("cdr", 1, 1, |frame| cell_part(frame, "cdr", |cell| &cell.cdr)),
        Callable::single_return("list", None, |frame, args| {
            let argc = args.unwrap_or_else(|| frame.stack().len());
            let items = frame.stack_mut().pop_n(argc)?;
            Ok(frame.domain().list(items))
        }),
        convert("type", |domain, value| Ok(domain.string(value.kind_name()))),
        convert("int", to_int),
        convert("float", to_float),
        convert("str", |domain, value| Ok(domain.string(value.to_string()))),
        convert("bool", |domain, value| Ok(domain.bool(domain.is_truthy(value)))),
        print(print_handler),
    ];

    for callable in builtins {
        let name: Rc<str> = Rc::from(callable.name());
        globals.put_value(name, domain.callable(callable))?;
    }
    tracing::debug!("installed prelude");
    Ok(())
}

/// `apply(f, args...)`: call `f` with the remaining arguments.
struct Apply;

impl DynamicCallable for Apply {
    fn name(&self) -> &str {
        APPLY_SYMBOL
    }

    fn call(&self, frame: &mut Frame, args: Option<usize>, rets: Option<usize>) -> EvalResult<()> {
        let argc = args.ok_or_else(|| EvalError::MissingArgumentCount(APPLY_SYMBOL.to_string()))?;
        if argc == 0 {
            return Err(EvalError::ArgumentCount {
                name: APPLY_SYMBOL.to_string(),
                expected: 1,
                actual: 0,
            });
        }
        let mut values = frame.stack_mut().pop_n(argc)?;
        let target = values.remove(0);
        frame.stack_mut().extend(values);
        call_value(frame, &target, Some(argc - 1), rets)
    }
}

/// `with(obj, code)`: run `code` with `obj`'s members in scope.
fn with(frame: &mut Frame) -> EvalResult<()> {
    let code = frame.stack_mut().pop()?;
    let target = frame.stack_mut().pop()?;
    let domain = Rc::clone(frame.domain());
    let code = domain.as_code(&code, WITH_SYMBOL)?;
    let composite = domain.as_composite(&target, WITH_SYMBOL)?;
    let Capability::Structured(members) = composite.get(TraitKind::Structured)? else {
        return Err(EvalError::MissingTrait {
            composite: composite.name().to_string(),
            trait_name: TraitKind::Structured.name(),
        });
    };

    let seed = members.keys().into_iter().filter_map(|key| {
        let value = members.get(&key)?;
        Some((key, Symbol::Value(value)))
    });
    let scope = SymbolMap::nested(frame.symbols(), seed);
    let mut inner = Frame::new(Rc::clone(&domain), scope);
    code.execute(&mut inner)?;

    let results = inner.into_values();
    validate_returns(Some(1), results.len())?;
    frame.stack_mut().extend(results);
    Ok(())
}

/// `record(name, field...)`: define a record type, return its constructor.
fn record(frame: &mut Frame, args: Option<usize>) -> EvalResult<TypedValue> {
    let argc = args.ok_or_else(|| EvalError::MissingArgumentCount("record".to_string()))?;
    if argc == 0 {
        return Err(EvalError::ArgumentCount {
            name: "record".to_string(),
            expected: 1,
            actual: 0,
        });
    }
    let values = frame.stack_mut().pop_n(argc)?;
    let domain = frame.domain();
    let name = Rc::clone(domain.as_str(&values[0], "record name")?);
    let fields = values[1..]
        .iter()
        .map(|field| domain.as_str(field, "record field").map(Rc::clone))
        .collect::<EvalResult<Vec<_>>>()?;
    tracing::debug!(record = %name, fields = fields.len(), "defined record type");
    Ok(RecordType::new(name, fields).constructor(domain))
}

fn cell_part(
    frame: &mut Frame,
    context: &str,
    part: fn(&crate::value::Cons) -> &TypedValue,
) -> EvalResult<()> {
    let value = frame.stack_mut().pop()?;
    let cell = frame.domain().as_cons(&value, context)?;
    let result = part(cell).clone();
    frame.stack_mut().push(result);
    Ok(())
}

/// One-in, one-out builtin.
fn convert(
    name: &'static str,
    f: fn(&Rc<TypeDomain>, &TypedValue) -> EvalResult<TypedValue>,
) -> Callable {
    Callable::fixed(name, 1, 1, move |frame| {
        let value = frame.stack_mut().pop()?;
        let result = f(frame.domain(), &value)?;
        frame.stack_mut().push(result);
        Ok(())
    })
}

fn conversion_error(value: &TypedValue, target: &'static str) -> EvalError {
    EvalError::Conversion {
        value: value.repr(),
        target,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float is range-checked before the cast"
)]
fn to_int(domain: &Rc<TypeDomain>, value: &TypedValue) -> EvalResult<TypedValue> {
    // 2^63 as f64; i64::MAX itself is not representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let n = match value.payload() {
        Payload::Int(n) => *n,
        Payload::Bool(b) => i64::from(*b),
        Payload::Float(f) if f.is_finite() && f.trunc() >= -LIMIT && f.trunc() < LIMIT => {
            f.trunc() as i64
        }
        Payload::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| conversion_error(value, "int"))?,
        _ => return Err(conversion_error(value, "int")),
    };
    Ok(domain.int(n))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int to float conversion is lossy by definition"
)]
fn to_float(domain: &Rc<TypeDomain>, value: &TypedValue) -> EvalResult<TypedValue> {
    let f = match value.payload() {
        Payload::Float(f) => *f,
        Payload::Int(n) => *n as f64,
        Payload::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| conversion_error(value, "float"))?,
        _ => return Err(conversion_error(value, "float")),
    };
    Ok(domain.float(f))
}

/// `print(args...)`: space-separated display forms, one line.
fn print(handler: &SharedPrintHandler) -> Callable {
    let handler = SharedPrintHandler::clone(handler);
    Callable::single_return("print", None, move |frame, args| {
        let argc = args.unwrap_or_else(|| frame.stack().len());
        let values = frame.stack_mut().pop_n(argc)?;
        let line = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        handler.println(&line);
        Ok(frame.domain().null())
    })
}
