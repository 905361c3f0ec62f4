//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime
//! values of a script. Values are immutable: operators always build a new value.
//!
//! # Value Types
//!
//! - [`Value::Number`]: 64-bit float; integral values display without a fraction
//! - [`Value::Str`]: text
//! - [`Value::Bool`]: result of every comparison and logical operator
//! - [`Value::Nil`]: the value of a scope that never returns
//! - [`Value::Closure`]: a function literal paired with the store it was defined in
//! - [`Value::Native`]: a host-provided function registered on the interpreter
//! - [`Value::Error`]: an error value produced by a native call-out

use super::frames::Bindings;
use crate::parser::ast::ScopeId;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Default)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    #[default]
    Nil,
    Closure(Rc<Closure>),
    Native(Rc<str>),
    Error(String),
}

/// A function value: parameters, body template, and the captured store
pub struct Closure {
    pub params: Vec<String>,
    pub body: ScopeId,
    pub env: Bindings,
}

// The captured store usually contains the closure itself, so only the
// signature is printed.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Create a closure value
    pub fn closure(params: Vec<String>, body: ScopeId, env: Bindings) -> Self {
        Value::Closure(Rc::new(Closure { params, body, env }))
    }

    /// Name of this value's kind, as used in operation errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Str(_) => "Str",
            Value::Bool(_) => "Bool",
            Value::Nil => "Nil",
            Value::Closure(_) => "Function",
            Value::Native(_) => "Native",
            Value::Error(_) => "Error",
        }
    }

    /// Truthiness used by `if`, `and`, `or` and `not`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Nil | Value::Error(_) => false,
            Value::Closure(_) | Value::Native(_) => true,
        }
    }

    /// Get the number, returns None if not a Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Language equality: same kind and same content, functions by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
            Value::Closure(c) => write!(f, "<fn({})>", c.params.join(", ")),
            Value::Native(name) => write!(f, "<native {}>", name),
            Value::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Format a number: integral values without a fractional part
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        if n == 0.0 {
            // -0 prints as 0
            return "0".to_string();
        }
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
