//! Memory model for the interpreter
//!
//! This module provides the core runtime abstractions:
//! - [`value`]: Runtime value representation (Number, Str, Bool, Nil, Closure, ...)
//! - [`frames`]: Variable stores and the runtime scope stack
//!
//! # Ownership
//!
//! Variable stores are reference-counted. A scope that shares its parent's
//! variables holds another handle to the same store; a scope that copies them
//! owns a fresh store filled from a snapshot. Closures hold a handle to the
//! store they were defined in, which keeps it alive after its frame is popped.

pub mod frames;
pub mod value;
