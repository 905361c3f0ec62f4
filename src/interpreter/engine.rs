// Execution engine for the interpreter

use crate::interpreter::builtins::NativeEvaluator;
use crate::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use crate::interpreter::errors::RuntimeError;
use crate::memory::frames::{capture_store, Bindings, Frame, ScopeStack};
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::transcript::Transcript;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Final global bindings of a run, ordered by name
pub type Globals = BTreeMap<String, Value>;

/// How a statement finished
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    /// Continue with the next statement
    Normal,
    /// A `return` was executed; unwind to the nearest valued scope
    Return(Value),
}

/// The main interpreter that executes a parsed program
pub struct Interpreter {
    /// Parsed program; shared so scope templates can be walked while `self` is mutated
    program: Rc<Program>,

    /// Runtime scope stack
    scopes: ScopeStack,

    /// Store of the global frame, kept after the run finishes
    globals: Bindings,

    /// Captured `print` output
    transcript: Transcript,

    /// Host evaluators reachable through native function values
    natives: FxHashMap<String, Box<dyn NativeEvaluator>>,

    /// Current source location being executed
    current_location: SourceLocation,

    /// Number of active function calls
    call_depth: usize,

    /// Limit on `call_depth`
    max_call_depth: usize,
}

impl Interpreter {
    /// Create a new interpreter for a parsed program
    pub fn new(program: Program) -> Self {
        Interpreter {
            program: Rc::new(program),
            scopes: ScopeStack::new(),
            globals: Bindings::new(),
            transcript: Transcript::new(),
            natives: FxHashMap::default(),
            current_location: SourceLocation::default(),
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Use `transcript` to collect output (for example an echoing one)
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    /// Set the maximum number of nested function calls
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Register a host evaluator, bound in the global scope as `name`
    pub fn register_native(&mut self, name: impl Into<String>, evaluator: impl NativeEvaluator + 'static) {
        self.natives.insert(name.into(), Box::new(evaluator));
    }

    /// Run the program from start to finish
    ///
    /// Every run starts from an empty global scope (plus registered native
    /// functions) and an empty transcript.
    pub fn run(&mut self) -> Result<Globals, RuntimeError> {
        self.scopes.clear();
        self.transcript.clear();
        self.call_depth = 0;

        let program = Rc::clone(&self.program);
        let root = program.root_scope().ok_or_else(|| RuntimeError::Unsupported {
            message: "program has no root scope".to_string(),
            location: SourceLocation::default(),
        })?;

        let store = capture_store(root.capture, None);
        for name in self.natives.keys() {
            store.set(name.clone(), Value::Native(Rc::from(name.as_str())));
        }
        self.globals = store.clone();

        let result = self.run_frame(Frame::new(root.id, store), &root.statements);
        self.scopes.clear();
        result?;

        let globals = self.globals();
        tracing::debug!(globals = globals.len(), output_lines = self.transcript.len(), "run finished");
        Ok(globals)
    }

    /// Push `frame`, execute `statements` in it, and pop it again
    pub(crate) fn run_frame(&mut self, frame: Frame, statements: &[AstNode]) -> Result<Flow, RuntimeError> {
        self.scopes.push_frame(frame);
        let result = self.execute_statements(statements);
        self.scopes.pop_frame();
        result
    }

    /// Execute statements in order until one returns
    fn execute_statements(&mut self, statements: &[AstNode]) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute_statement(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Activate the scope template `id` on top of the current frame
    pub(crate) fn execute_scope(&mut self, id: ScopeId, location: SourceLocation) -> Result<Flow, RuntimeError> {
        let program = Rc::clone(&self.program);
        let template = Self::template(&program, id, location)?;
        let store = self.scopes.store_for(template);
        self.run_frame(Frame::new(template.id, store), &template.statements)
    }

    pub(crate) fn template(program: &Program, id: ScopeId, location: SourceLocation) -> Result<&ScopeTemplate, RuntimeError> {
        program.scope(id).ok_or_else(|| RuntimeError::Unsupported {
            message: format!("unknown scope {}", id),
            location,
        })
    }

    /// Store of the innermost frame
    pub(crate) fn current_store(&self, location: SourceLocation) -> Result<Bindings, RuntimeError> {
        self.scopes
            .current()
            .map(|f| f.store.clone())
            .ok_or_else(|| RuntimeError::Unsupported {
                message: "no active scope".to_string(),
                location,
            })
    }

    /// Store of the outermost frame
    pub(crate) fn global_store(&self, location: SourceLocation) -> Result<Bindings, RuntimeError> {
        self.scopes
            .global()
            .map(|f| f.store.clone())
            .ok_or_else(|| RuntimeError::Unsupported {
                message: "no global scope".to_string(),
                location,
            })
    }

    pub(crate) fn set_location(&mut self, location: SourceLocation) {
        self.current_location = location;
    }

    pub(crate) fn program(&self) -> Rc<Program> {
        Rc::clone(&self.program)
    }

    pub(crate) fn natives_mut(&mut self) -> &mut FxHashMap<String, Box<dyn NativeEvaluator>> {
        &mut self.natives
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Enter a function activation, failing if the depth limit is reached
    pub(crate) fn enter_call(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::StackExhausted {
                limit: self.max_call_depth,
                location,
            });
        }
        self.call_depth += 1;
        tracing::trace!(depth = self.call_depth, "call");
        Ok(())
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    // ========== Getter methods for the front end ==========

    /// Get the global bindings, ordered by name
    pub fn globals(&self) -> Globals {
        self.globals.to_sorted()
    }

    /// Get the captured output
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Get the location of the statement executed last
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }
}
