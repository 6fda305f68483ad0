//! Binary and unary operator implementations.
//!
//! Operands must share a kind; there is no implicit int/float coercion.

use std::cmp::Ordering;
use std::rc::Rc;

use calc_ir::{BinaryOp, UnaryOp};

use crate::composite::{Capability, TraitKind};
use crate::errors::{EvalError, EvalResult};
use crate::value::{Payload, TypeDomain, TypedValue};

/// Evaluate `left op right`.
pub fn evaluate_binary(
    domain: &Rc<TypeDomain>,
    op: BinaryOp,
    left: &TypedValue,
    right: &TypedValue,
) -> EvalResult<TypedValue> {
    match op {
        BinaryOp::Eq => Ok(domain.bool(domain.equals(left, right))),
        BinaryOp::NotEq => Ok(domain.bool(!domain.equals(left, right))),
        BinaryOp::And => Ok(domain.bool(domain.is_truthy(left) && domain.is_truthy(right))),
        BinaryOp::Or => Ok(domain.bool(domain.is_truthy(left) || domain.is_truthy(right))),
        BinaryOp::Cons => Ok(domain.cons(left.clone(), right.clone())),
        BinaryOp::Dot => member_access(domain, left, right),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(domain, op, left, right)?;
            let result = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(domain.bool(result))
        }
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod => arithmetic(domain, op, left, right),
        BinaryOp::Lambda | BinaryOp::Split => Err(invalid(op, left, right)),
    }
}

/// Evaluate `op operand`.
pub fn evaluate_unary(
    domain: &Rc<TypeDomain>,
    op: UnaryOp,
    operand: &TypedValue,
) -> EvalResult<TypedValue> {
    match (op, operand.payload()) {
        (UnaryOp::Not, _) => Ok(domain.bool(!domain.is_truthy(operand))),
        (UnaryOp::Neg, Payload::Int(n)) if same_domain(domain, operand) => n
            .checked_neg()
            .map(|n| domain.int(n))
            .ok_or(EvalError::IntegerOverflow("-")),
        (UnaryOp::Neg, Payload::Float(f)) if same_domain(domain, operand) => Ok(domain.float(-f)),
        (UnaryOp::Neg, _) => Err(EvalError::InvalidUnaryOperation {
            op: op.as_symbol(),
            operand: operand.kind_name().to_string(),
        }),
    }
}

fn same_domain(domain: &TypeDomain, value: &TypedValue) -> bool {
    domain.is(value, value.kind())
}

fn invalid(op: BinaryOp, left: &TypedValue, right: &TypedValue) -> EvalError {
    EvalError::InvalidOperation {
        op: op.as_symbol(),
        left: left.kind_name().to_string(),
        right: right.kind_name().to_string(),
    }
}

fn arithmetic(
    domain: &Rc<TypeDomain>,
    op: BinaryOp,
    left: &TypedValue,
    right: &TypedValue,
) -> EvalResult<TypedValue> {
    if !same_domain(domain, left) || !same_domain(domain, right) {
        return Err(invalid(op, left, right));
    }
    match (left.payload(), right.payload()) {
        (Payload::Int(a), Payload::Int(b)) => int_arithmetic(op, *a, *b).map(|n| domain.int(n)),
        (Payload::Float(a), Payload::Float(b)) => {
            let result = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                _ => a % b,
            };
            Ok(domain.float(result))
        }
        (Payload::Str(a), Payload::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(domain.string(joined))
        }
        _ => Err(invalid(op, left, right)),
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> EvalResult<i64> {
    let op_name = op.as_symbol();
    match op {
        BinaryOp::Add => a.checked_add(b).ok_or(EvalError::IntegerOverflow(op_name)),
        BinaryOp::Sub => a.checked_sub(b).ok_or(EvalError::IntegerOverflow(op_name)),
        BinaryOp::Mul => a.checked_mul(b).ok_or(EvalError::IntegerOverflow(op_name)),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => a.checked_div(b).ok_or(EvalError::IntegerOverflow(op_name)),
        _ => a.checked_rem(b).ok_or(EvalError::IntegerOverflow(op_name)),
    }
}

fn compare(
    domain: &TypeDomain,
    op: BinaryOp,
    left: &TypedValue,
    right: &TypedValue,
) -> EvalResult<Ordering> {
    if !same_domain(domain, left) || !same_domain(domain, right) {
        return Err(invalid(op, left, right));
    }
    match (left.payload(), right.payload()) {
        (Payload::Int(a), Payload::Int(b)) => Ok(a.cmp(b)),
        (Payload::Str(a), Payload::Str(b)) => Ok(a.cmp(b)),
        (Payload::Float(a), Payload::Float(b)) => {
            a.partial_cmp(b).ok_or_else(|| invalid(op, left, right))
        }
        _ => Err(invalid(op, left, right)),
    }
}

/// `target.key` through the `Structured` trait.
fn member_access(
    domain: &TypeDomain,
    target: &TypedValue,
    key: &TypedValue,
) -> EvalResult<TypedValue> {
    let key = domain.as_str(key, "member name")?;
    let composite = domain.as_composite(target, "member access")?;
    let Capability::Structured(members) = composite.get(TraitKind::Structured)? else {
        return Err(EvalError::MissingTrait {
            composite: composite.name().to_string(),
            trait_name: TraitKind::Structured.name(),
        });
    };
    members.get(key).ok_or_else(|| EvalError::NoSuchMember {
        composite: composite.name().to_string(),
        member: key.to_string(),
    })
}
