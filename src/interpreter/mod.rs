//! Tree-walking interpreter
//!
//! This module provides the core execution logic:
//! - [`engine`]: Main interpreter, run loop, scope activation
//! - [`statements`] / [`expressions`]: per-node execution
//! - [`ops`]: operator dispatch over runtime values
//! - [`builtins`]: native call-out to a host evaluator
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! The interpreter walks the AST depth-first. Each scope activation pushes a
//! frame on the runtime scope stack; the global frame's store survives the
//! run and is returned as [`Globals`].

pub mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
pub mod ops;
mod statements;

pub use engine::{Globals, Interpreter};
