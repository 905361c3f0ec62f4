//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal - they halt execution and are reported with the
//! source location of the node being evaluated.

use crate::interpreter::ops::OperationError;
use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Reference to a name the current scope has never bound
    #[error("Invalid Variable: {name}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// No handler for an operator and operand kinds
    #[error("Unsupported operation '{operator}' for {}", .operands.join(" and "))]
    Operation {
        operator: String,
        operands: Vec<String>,
        location: SourceLocation,
    },

    /// Call with fewer arguments than the function has parameters
    #[error("Not enough parameters: expected {expected}, got {got}")]
    NotEnoughParameters {
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Call of a value that is not a function
    #[error("{kind} value is not callable")]
    NotCallable {
        kind: &'static str,
        location: SourceLocation,
    },

    /// Call depth exceeded the configured limit
    #[error("stack exhausted: call depth exceeded {limit}")]
    StackExhausted {
        limit: usize,
        location: SourceLocation,
    },

    /// A native function value whose evaluator is no longer registered
    #[error("Native function '{name}' is not available")]
    NativeUnavailable {
        name: String,
        location: SourceLocation,
    },

    /// Program structure the evaluator cannot execute
    #[error("Unsupported: {message}")]
    Unsupported {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::Operation { location, .. }
            | RuntimeError::NotEnoughParameters { location, .. }
            | RuntimeError::NotCallable { location, .. }
            | RuntimeError::StackExhausted { location, .. }
            | RuntimeError::NativeUnavailable { location, .. }
            | RuntimeError::Unsupported { location, .. } => *location,
        }
    }

    /// Attach a location to a value-level operation error
    pub fn from_operation(error: OperationError, location: SourceLocation) -> Self {
        RuntimeError::Operation {
            operator: error.operator,
            operands: error.operands,
            location,
        }
    }
}
