//! Expression evaluation implementation
//!
//! This module handles evaluation of all expression kinds, including:
//!
//! - Literals and variables
//! - Binary and unary operators (dispatched through [`crate::interpreter::ops`])
//! - Function literals, which capture the store of the current frame
//! - Scopes used as values
//! - Calls of closures and native functions
//!
//! # Calls
//!
//! A call evaluates the callee, then every argument in the caller's frame.
//! The body then runs in a new frame whose store is built from the closure's
//! captured store by the body's capture mode (a snapshot, since function
//! bodies are `Copied`), with the parameters bound into it. Parameters and
//! locals therefore never leak back into the defining scope.

use crate::interpreter::engine::{Flow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::frames::{capture_store, Frame};
use crate::memory::value::{Closure, Value};
use crate::parser::ast::*;
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate_expr(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        ensure_sufficient_stack(|| self.evaluate_expr_inner(expr))
    }

    fn evaluate_expr_inner(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::Number(n, _) => Ok(Value::Number(*n)),

            AstNode::StringLiteral(s, _) => Ok(Value::Str(s.clone())),

            AstNode::Boolean(b, _) => Ok(Value::Bool(*b)),

            AstNode::Nil(_) => Ok(Value::Nil),

            AstNode::Variable(name, loc) => self
                .current_store(*loc)?
                .get(name)
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    location: *loc,
                }),

            AstNode::BinaryOp {
                op,
                left,
                right,
                location,
            } => self.evaluate_binary_op(*op, left, right, *location),

            AstNode::UnaryOp {
                op,
                operand,
                location,
            } => self.evaluate_unary_op(*op, operand, *location),

            AstNode::FunctionLiteral {
                params,
                body,
                location,
            } => {
                let env = self.current_store(*location)?;
                Ok(Value::closure(params.clone(), *body, env))
            }

            AstNode::Scope { id, location } => match self.execute_scope(*id, *location)? {
                Flow::Return(value) => Ok(value),
                Flow::Normal => Ok(Value::Nil),
            },

            AstNode::Call {
                callee,
                args,
                location,
            } => self.evaluate_call(callee, args, *location),

            AstNode::Assign { location, .. }
            | AstNode::Reassign { location, .. }
            | AstNode::If { location, .. }
            | AstNode::Print { location, .. }
            | AstNode::Return { location, .. }
            | AstNode::Empty(location) => Err(RuntimeError::Unsupported {
                message: "statement used as a value".to_string(),
                location: *location,
            }),
        }
    }

    fn evaluate_call(
        &mut self,
        callee: &AstNode,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let callee_val = self.evaluate_expr(callee)?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate_expr(arg)?);
        }

        match callee_val {
            Value::Closure(closure) => self.call_closure(&closure, arg_values, location),
            Value::Native(name) => self.call_native(&name, arg_values, location),
            other => Err(RuntimeError::NotCallable {
                kind: other.kind_name(),
                location,
            }),
        }
    }

    /// Activate a closure's body with `args` bound to its parameters.
    /// Extra arguments are ignored.
    fn call_closure(
        &mut self,
        closure: &Closure,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if args.len() < closure.params.len() {
            return Err(RuntimeError::NotEnoughParameters {
                expected: closure.params.len(),
                got: args.len(),
                location,
            });
        }

        let program = self.program();
        let template = Self::template(&program, closure.body, location)?;

        let store = capture_store(template.capture, Some(&closure.env));
        for (param, value) in closure.params.iter().zip(args) {
            store.set(param.as_str(), value);
        }

        self.enter_call(location)?;
        let result = self.run_frame(Frame::new(template.id, store), &template.statements);
        self.exit_call();

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}
