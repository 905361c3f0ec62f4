//! Unary operator evaluation

use super::OperationError;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, SourceLocation, UnOp};

/// Apply a unary operator to a value
pub fn apply_unary(op: UnOp, operand: &Value) -> Result<Value, OperationError> {
    let handled = match operand {
        Value::Number(n) => number_unary(op, *n),
        _ => None,
    };

    handled
        .or_else(|| match op {
            UnOp::Not => Some(Value::Bool(!operand.is_truthy())),
            _ => None,
        })
        .ok_or_else(|| OperationError::new(op.symbol(), &[operand]))
}

/// Number handlers: sign operators
pub fn number_unary(op: UnOp, n: f64) -> Option<Value> {
    match op {
        UnOp::Pos => Some(Value::Number(n)),
        UnOp::Neg => Some(Value::Number(-n)),
        UnOp::Not => None,
    }
}

impl Interpreter {
    pub(crate) fn evaluate_unary_op(
        &mut self,
        op: UnOp,
        operand: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let val = self.evaluate_expr(operand)?;
        apply_unary(op, &val).map_err(|e| RuntimeError::from_operation(e, location))
    }
}
