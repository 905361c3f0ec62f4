//! Statement execution implementation
//!
//! This module handles the execution of every statement kind:
//!
//! - Bindings (`let`, `pub let`) and reassignment
//! - `if`, `print`, `return`
//! - Nested blocks
//! - Expression statements (evaluated for their effects)
//!
//! # Control Flow
//!
//! Statements report how they finished with [`Flow`]. A `return` unwinds
//! through blocks and `if` bodies until it reaches a function body, a scope
//! used as a value, or the program scope.

use crate::interpreter::engine::{Flow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::apply_binary;
use crate::parser::ast::*;
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// Execute a single statement
    ///
    /// Nested blocks and `if` bodies re-enter here, so the stack is grown
    /// on demand the same way as for expressions.
    pub(crate) fn execute_statement(&mut self, stmt: &AstNode) -> Result<Flow, RuntimeError> {
        ensure_sufficient_stack(|| self.execute_statement_inner(stmt))
    }

    fn execute_statement_inner(&mut self, stmt: &AstNode) -> Result<Flow, RuntimeError> {
        self.set_location(stmt.location());

        match stmt {
            AstNode::Assign {
                name,
                value,
                is_public,
                location,
            } => {
                self.execute_assign(name, value, *is_public, *location)?;
                Ok(Flow::Normal)
            }

            AstNode::Reassign {
                name,
                op,
                value,
                location,
            } => {
                self.execute_reassign(name, *op, value, *location)?;
                Ok(Flow::Normal)
            }

            AstNode::If {
                condition,
                body,
                location,
            } => self.execute_if(condition, *body, *location),

            AstNode::Print { expr, location } => {
                let value = self.evaluate_expr(expr)?;
                self.transcript_mut().print(value.to_string(), *location);
                Ok(Flow::Normal)
            }

            AstNode::Return { expr, .. } => Ok(Flow::Return(self.evaluate_expr(expr)?)),

            AstNode::Scope { id, location } => self.execute_scope(*id, *location),

            AstNode::Empty(_) => Ok(Flow::Normal),

            // Expression as a statement: evaluate and discard the result
            expr => {
                self.evaluate_expr(expr)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn execute_assign(
        &mut self,
        name: &str,
        value: &AstNode,
        is_public: bool,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate_expr(value)?;

        if is_public {
            self.global_store(location)?.set(name, value.clone());
        }
        self.current_store(location)?.set(name, value);
        Ok(())
    }

    /// `name = expr` may create `name`; `name op= expr` needs its current value
    fn execute_reassign(
        &mut self,
        name: &str,
        op: BinOp,
        value: &AstNode,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let rhs = self.evaluate_expr(value)?;
        let store = self.current_store(location)?;

        let result = match op {
            BinOp::Assign => rhs,
            op => {
                let current = store
                    .get(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.to_string(),
                        location,
                    })?;
                apply_binary(op, &current, &rhs)
                    .map_err(|e| RuntimeError::from_operation(e, location))?
            }
        };

        store.set(name, result);
        Ok(())
    }

    fn execute_if(
        &mut self,
        condition: &AstNode,
        body: ScopeId,
        location: SourceLocation,
    ) -> Result<Flow, RuntimeError> {
        let cond_val = self.evaluate_expr(condition)?;

        if cond_val.is_truthy() {
            self.execute_scope(body, location)
        } else {
            Ok(Flow::Normal)
        }
    }
}
