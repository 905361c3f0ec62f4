//! # Introduction
//!
//! ltscript is a tree-walking interpreter for a small dynamically typed
//! scripting language with nested scopes, closures and public bindings.
//! Programs run from a file or from an interactive multi-line prompt, and a
//! finished run can be inspected in a terminal viewer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → (output, global bindings)
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an arena of scope templates.
//! 2. [`interpreter`] — walks the AST, pushing a frame per scope activation.
//! 3. [`memory`] — runtime [`memory::value::Value`]s and the reference-counted
//!    variable stores frames share or copy.
//! 4. [`transcript`] — records `print` output, optionally echoing it.
//! 5. [`diagnostic`] — turns any fault into a line/caret report.
//! 6. [`repl`], [`config`], [`ui`] — the `lt` binary's front end; not part of
//!    the stable library API.
//!
//! ## Example
//!
//! ```
//! let outcome = ltscript::run_source("let x = 2; let y = x + 3; print y;", "example").unwrap();
//! assert_eq!(outcome.output, vec!["5"]);
//! assert_eq!(outcome.globals["y"].to_string(), "5");
//! ```

pub mod config;
pub mod diagnostic;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod repl;
mod stack;
pub mod transcript;
pub mod ui;

use config::RunConfig;
use interpreter::errors::RuntimeError;
use interpreter::{Globals, Interpreter};
use parser::ast::{Program, SourceLocation};
use parser::lexer::{tokenize, LexError};
use parser::parse::{parse, ParseError};
use thiserror::Error;
use transcript::{OutputLine, Transcript};

/// Any fault that ends a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Byte offset in the source where the fault was detected
    pub fn location(&self) -> SourceLocation {
        match self {
            Error::Lex(e) => e.location,
            Error::Parse(e) => e.location,
            Error::Runtime(e) => e.location(),
        }
    }
}

/// Output and final global bindings of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: Vec<String>,
    pub globals: Globals,
}

/// Everything a run produced, including partial results of a failed run
#[derive(Debug, Clone)]
pub struct Execution {
    pub output: Vec<OutputLine>,
    pub globals: Globals,
    pub error: Option<Error>,
    /// Location of the last statement executed
    pub last_location: SourceLocation,
}

impl Execution {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Printed lines as plain strings
    pub fn output_text(&self) -> Vec<String> {
        self.output.iter().map(|l| l.text.clone()).collect()
    }
}

/// Tokenize and parse `source`
pub fn compile(source: &str, label: &str) -> Result<Program, Error> {
    let tokens = tokenize(source, label)?;
    Ok(parse(tokens)?)
}

/// Run `source` with output captured (not echoed)
pub fn run_source(source: &str, label: &str) -> Result<Outcome, Error> {
    let execution = execute(source, label, &RunConfig::quiet());
    match execution.error {
        Some(error) => Err(error),
        None => Ok(Outcome {
            output: execution.output.into_iter().map(|l| l.text).collect(),
            globals: execution.globals,
        }),
    }
}

/// Compile and run `source` according to `config`
pub fn execute(source: &str, label: &str, config: &RunConfig) -> Execution {
    let program = match compile(source, label) {
        Ok(program) => program,
        Err(error) => {
            return Execution {
                output: Vec::new(),
                globals: Globals::new(),
                last_location: error.location(),
                error: Some(error),
            }
        }
    };

    let transcript = if config.echo_output {
        Transcript::echoing()
    } else {
        Transcript::new()
    };
    let mut interpreter = Interpreter::new(program)
        .with_transcript(transcript)
        .with_max_call_depth(config.max_call_depth);

    let result = interpreter.run();
    Execution {
        output: interpreter.transcript().lines.clone(),
        globals: interpreter.globals(),
        error: result.err().map(Error::from),
        last_location: interpreter.current_location(),
    }
}
