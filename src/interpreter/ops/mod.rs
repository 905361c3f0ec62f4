//! Operator dispatch over runtime values
//!
//! Each value kind has its own handler for the operators it implements
//! ([`binary::number_binary`], [`binary::str_binary`], [`unary::number_unary`]).
//! Dispatch tries the operand kind's handler first, then the default handlers
//! shared by every kind, and reports an [`OperationError`] if neither applies.

pub mod binary;
pub mod unary;

pub use binary::apply_binary;
pub use unary::apply_unary;

use crate::memory::value::Value;
use thiserror::Error;

/// No handler exists for an operator and the kinds of its operands
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unsupported operation '{operator}' for {}", .operands.join(" and "))]
pub struct OperationError {
    pub operator: String,
    pub operands: Vec<String>,
}

impl OperationError {
    pub fn new(operator: impl Into<String>, operands: &[&Value]) -> Self {
        OperationError {
            operator: operator.into(),
            operands: operands.iter().map(|v| v.kind_name().to_string()).collect(),
        }
    }
}
