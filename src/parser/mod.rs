//! Script source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Values: numbers, strings, booleans, nil, functions
//! - Statements: `let`, `pub let`, reassignment, `fn`, `if`, `return`, `print`
//! - Expressions: arithmetic, comparison, logic, calls, function literals
//! - Blocks `{ ... }` are scopes; function bodies and scope expressions yield
//!   their last unterminated expression
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
