//! Value stack owned by a frame.

use crate::errors::{EvalError, EvalResult};
use crate::value::TypedValue;

/// Operand stack. Slices and vectors are ordered bottom to top.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    items: Vec<TypedValue>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, value: TypedValue) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> EvalResult<TypedValue> {
        self.items.pop().ok_or(EvalError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Item at `depth` (0 = top).
    pub fn peek(&self, depth: usize) -> EvalResult<&TypedValue> {
        let len = self.items.len();
        if depth >= len {
            return Err(self.underflow(depth + 1));
        }
        Ok(&self.items[len - 1 - depth])
    }

    /// Read-only view of the top `count` items.
    pub fn top(&self, count: usize) -> EvalResult<&[TypedValue]> {
        let len = self.items.len();
        if count > len {
            return Err(self.underflow(count));
        }
        Ok(&self.items[len - count..])
    }

    /// Remove the top `count` items.
    pub fn pop_n(&mut self, count: usize) -> EvalResult<Vec<TypedValue>> {
        let len = self.items.len();
        if count > len {
            return Err(self.underflow(count));
        }
        Ok(self.items.split_off(len - count))
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = TypedValue>) {
        self.items.extend(values);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[TypedValue] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<TypedValue> {
        self.items
    }

    fn underflow(&self, needed: usize) -> EvalError {
        EvalError::StackUnderflow {
            needed,
            available: self.items.len(),
        }
    }
}
