//! Native call-out
//!
//! A native function hands a source snippet to an evaluator supplied by the
//! host and converts whatever comes back into a runtime [`Value`].
//!
//! # Registering
//!
//! ```
//! use ltscript::interpreter::builtins::{NativeEvaluator, NativeReturn};
//! use ltscript::interpreter::Interpreter;
//! use ltscript::parser::{lexer::tokenize, parse::parse};
//!
//! struct Upper;
//!
//! impl NativeEvaluator for Upper {
//!     fn evaluate(&mut self, snippet: &str) -> NativeReturn {
//!         NativeReturn::Text(snippet.to_uppercase())
//!     }
//! }
//!
//! let program = parse(tokenize("let s = upper(\"hi\");", "doc").unwrap()).unwrap();
//! let mut interpreter = Interpreter::new(program);
//! interpreter.register_native("upper", Upper);
//! let globals = interpreter.run().unwrap();
//! assert_eq!(globals["s"].to_string(), "HI");
//! ```
//!
//! # Conversion
//!
//! - numbers, text, booleans and nil map to the matching value kind
//! - [`NativeReturn::Error`] becomes an error value (`Error: ...`), which the
//!   script can print or test for truthiness
//! - [`NativeReturn::Unsupported`] is an operation error

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::SourceLocation;

/// What a host evaluator produced
#[derive(Debug, Clone, PartialEq)]
pub enum NativeReturn {
    Number(f64),
    Text(String),
    Bool(bool),
    Nil,
    /// The evaluation failed with this message
    Error(String),
    /// The evaluation produced something with no runtime counterpart
    Unsupported(String),
}

/// Host-side evaluator behind a native function
pub trait NativeEvaluator {
    fn evaluate(&mut self, snippet: &str) -> NativeReturn;
}

impl<F> NativeEvaluator for F
where
    F: FnMut(&str) -> NativeReturn,
{
    fn evaluate(&mut self, snippet: &str) -> NativeReturn {
        self(snippet)
    }
}

impl Interpreter {
    /// Call the native function `name` with already evaluated arguments.
    /// The first argument must be a string; the rest are ignored.
    pub(crate) fn call_native(
        &mut self,
        name: &str,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let snippet = match args.first() {
            Some(Value::Str(s)) => s.clone(),
            Some(other) => {
                return Err(RuntimeError::Operation {
                    operator: name.to_string(),
                    operands: vec![other.kind_name().to_string()],
                    location,
                })
            }
            None => {
                return Err(RuntimeError::NotEnoughParameters {
                    expected: 1,
                    got: 0,
                    location,
                })
            }
        };

        let evaluator = self
            .natives_mut()
            .get_mut(name)
            .ok_or_else(|| RuntimeError::NativeUnavailable {
                name: name.to_string(),
                location,
            })?;

        tracing::debug!(native = name, "native call");
        match evaluator.evaluate(&snippet) {
            NativeReturn::Number(n) => Ok(Value::Number(n)),
            NativeReturn::Text(s) => Ok(Value::Str(s)),
            NativeReturn::Bool(b) => Ok(Value::Bool(b)),
            NativeReturn::Nil => Ok(Value::Nil),
            NativeReturn::Error(message) => Ok(Value::Error(message)),
            NativeReturn::Unsupported(kind) => Err(RuntimeError::Operation {
                operator: name.to_string(),
                operands: vec![kind],
                location,
            }),
        }
    }
}
