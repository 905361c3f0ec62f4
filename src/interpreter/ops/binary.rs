//! Binary operator evaluation

use super::OperationError;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, BinOp, SourceLocation};

/// Apply a binary operator to two values
pub fn apply_binary(op: BinOp, left: &Value, right: &Value) -> Result<Value, OperationError> {
    let handled = match (left, right) {
        (Value::Number(a), Value::Number(b)) => number_binary(op, *a, *b),
        (Value::Str(a), Value::Str(b)) => str_binary(op, a, b),
        _ => None,
    };

    handled
        .or_else(|| default_binary(op, left, right))
        .ok_or_else(|| OperationError::new(op.symbol(), &[left, right]))
}

/// Number handlers: IEEE arithmetic and ordering
pub fn number_binary(op: BinOp, a: f64, b: f64) -> Option<Value> {
    let value = match op {
        BinOp::Add => Value::Number(a + b),
        BinOp::Sub => Value::Number(a - b),
        BinOp::Mul => Value::Number(a * b),
        BinOp::Div => Value::Number(a / b),
        BinOp::FloorDiv => Value::Number((a / b).floor()),
        BinOp::Mod => Value::Number(floored_mod(a, b)),
        BinOp::Pow => Value::Number(a.powf(b)),
        BinOp::Eq => Value::Bool(a == b),
        BinOp::Ne => Value::Bool(a != b),
        BinOp::Lt => Value::Bool(a < b),
        BinOp::Le => Value::Bool(a <= b),
        BinOp::Gt => Value::Bool(a > b),
        BinOp::Ge => Value::Bool(a >= b),
        BinOp::And | BinOp::Or | BinOp::Assign => return None,
    };
    Some(value)
}

/// Str handlers: concatenation and lexicographic ordering
pub fn str_binary(op: BinOp, a: &str, b: &str) -> Option<Value> {
    let value = match op {
        BinOp::Add => Value::Str(format!("{}{}", a, b)),
        BinOp::Lt => Value::Bool(a < b),
        BinOp::Le => Value::Bool(a <= b),
        BinOp::Gt => Value::Bool(a > b),
        BinOp::Ge => Value::Bool(a >= b),
        _ => return None,
    };
    Some(value)
}

/// Handlers every value kind falls back to
fn default_binary(op: BinOp, left: &Value, right: &Value) -> Option<Value> {
    let value = match op {
        BinOp::Assign => right.clone(),
        BinOp::Eq => Value::Bool(left == right),
        BinOp::Ne => Value::Bool(left != right),
        BinOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        _ => return None,
    };
    Some(value)
}

/// Modulo whose result takes the sign of the divisor
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

impl Interpreter {
    pub(crate) fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        left: &AstNode,
        right: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        // Both operands are always evaluated; `and`/`or` are value handlers
        let left_val = self.evaluate_expr(left)?;
        let right_val = self.evaluate_expr(right)?;

        apply_binary(op, &left_val, &right_val)
            .map_err(|e| RuntimeError::from_operation(e, location))
    }
}
