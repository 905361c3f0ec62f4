//! Statement parsing implementation
//!
//! This module handles scope bodies and every statement form:
//!
//! - Nested scopes: `{ ... }`
//! - Bindings: `let x = 1`, `pub let x = 1`, `let x += 1`
//! - Reassignment: `x = 2`, `x += 2`, `x //= 2`
//! - Named functions: `fn f(a) { ... }`, `pub fn f(a) { ... }`
//! - `if`, `return`, `print`
//! - Bare expressions
//!
//! # Grammar
//!
//! ```text
//! scope     ::= '{' statement (';' statement)* [';'] '}'
//! statement ::= scope | binding | 'pub' (binding | function) | function
//!             | if_stmt | return_stmt | print_stmt | reassign | expr | <empty>
//! ```
//!
//! If the last statement of a function body, scope expression or the program
//! is an expression that is not followed by `;`, it becomes the scope's
//! implicit `return`. Blocks in statement position have no value and are
//! left as written.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::stack::ensure_sufficient_stack;

/// Map a token to the operator of a compound assignment (`+=`, `//=`, ...)
fn compound_operator(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::SlashSlash => Some(BinOp::FloorDiv),
        TokenKind::Percent => Some(BinOp::Mod),
        TokenKind::Caret => Some(BinOp::Pow),
        _ => None,
    }
}

impl Parser {
    /// Parse a scope whose value is used: function bodies, scope expressions
    /// and the program itself. An unterminated trailing expression becomes
    /// the scope's `return`.
    pub(crate) fn parse_scope(&mut self, capture: CaptureMode) -> Result<ScopeId, ParseError> {
        self.parse_scope_body(capture, true)
    }

    /// Parse a scope in statement position (`{ ... };`, `if` bodies), whose
    /// value is discarded
    pub(crate) fn parse_block(&mut self, capture: CaptureMode) -> Result<ScopeId, ParseError> {
        self.parse_scope_body(capture, false)
    }

    fn parse_scope_body(&mut self, capture: CaptureMode, promote_tail: bool) -> Result<ScopeId, ParseError> {
        let loc = self.current_location();
        self.expect_token(&TokenKind::LBrace, "'{'")?;

        let id = self.open_scope(capture, loc);
        let statements = self.parse_statement_list(promote_tail)?;
        self.expect_token(&TokenKind::RBrace, "'}'")?;
        self.close_scope(id, statements)?;

        Ok(id)
    }

    /// Parse `;`-separated statements up to (not including) the closing brace
    fn parse_statement_list(&mut self, promote_tail: bool) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = vec![self.parse_statement()?];
        let mut terminated = false;

        while self.match_token(&TokenKind::Semicolon) {
            if self.check(&TokenKind::RBrace) {
                terminated = true;
                break;
            }
            statements.push(self.parse_statement()?);
        }

        // A stray identifier here would otherwise be silently dropped
        if matches!(self.peek().kind, TokenKind::Ident(_)) {
            return Err(self.error("';'"));
        }

        if promote_tail && !terminated {
            if let Some(last) = statements.pop() {
                let last = if last.is_expression() {
                    let location = last.location();
                    AstNode::Return {
                        expr: Box::new(last),
                        location,
                    }
                } else {
                    last
                };
                statements.push(last);
            }
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        match &self.peek().kind {
            TokenKind::LBrace => {
                let id = self.parse_block(CaptureMode::Shared)?;
                Ok(AstNode::Scope { id, location: loc })
            }
            TokenKind::Let => {
                self.advance();
                self.parse_binding(false, loc)
            }
            TokenKind::Pub => {
                self.advance();
                if self.match_token(&TokenKind::Let) {
                    self.parse_binding(true, loc)
                } else if self.match_token(&TokenKind::Fn) {
                    self.parse_named_function(true, loc)
                } else {
                    Err(self.error("'let' or 'fn' after 'pub'"))
                }
            }
            TokenKind::Fn if matches!(self.peek_ahead(1).map(|t| &t.kind), Some(TokenKind::Ident(_))) => {
                self.advance();
                self.parse_named_function(false, loc)
            }
            TokenKind::If => {
                self.advance();
                self.parse_if_statement(loc)
            }
            TokenKind::Return => {
                self.advance();
                self.parse_return_statement(loc)
            }
            TokenKind::Print => {
                self.advance();
                let expr = Box::new(self.parse_expression()?);
                Ok(AstNode::Print {
                    expr,
                    location: loc,
                })
            }
            TokenKind::RBrace => Ok(AstNode::Empty(loc)),
            TokenKind::Ident(_) if self.is_reassignment() => self.parse_reassignment(loc),
            _ => {
                let expr = self.parse_expression()?;
                if self.check(&TokenKind::Eq) {
                    return Err(self.error("assignable variable"));
                }
                Ok(expr)
            }
        }
    }

    /// Identifier followed by `=` or by a compound operator and `=`
    fn is_reassignment(&self) -> bool {
        if self.check_ahead(1, &TokenKind::Eq) {
            return true;
        }
        self.peek_ahead(1)
            .is_some_and(|t| compound_operator(&t.kind).is_some())
            && self.check_ahead(2, &TokenKind::Eq)
    }

    /// Parse `=` or `op=`, returning the operator to apply
    fn parse_assign_operator(&mut self) -> Result<BinOp, ParseError> {
        if self.match_token(&TokenKind::Eq) {
            return Ok(BinOp::Assign);
        }

        if let Some(op) = compound_operator(&self.peek().kind) {
            if self.check_ahead(1, &TokenKind::Eq) {
                self.advance();
                self.advance();
                return Ok(op);
            }
        }

        Err(self.error("'=' or a compound assignment"))
    }

    /// Parse the rest of `let name = expr` (after `let`)
    fn parse_binding(&mut self, is_public: bool, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let name_loc = self.current_location();
        let name = self.expect_identifier()?;
        let op = self.parse_assign_operator()?;
        let rhs = self.parse_expression()?;

        let value = match op {
            BinOp::Assign => rhs,
            op => AstNode::BinaryOp {
                op,
                left: Box::new(AstNode::Variable(name.clone(), name_loc)),
                right: Box::new(rhs),
                location: name_loc,
            },
        };

        Ok(AstNode::Assign {
            name,
            value: Box::new(value),
            is_public,
            location: loc,
        })
    }

    /// Parse `name = expr` or `name op= expr`
    fn parse_reassignment(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier()?;
        let op = self.parse_assign_operator()?;
        let value = Box::new(self.parse_expression()?);

        Ok(AstNode::Reassign {
            name,
            op,
            value,
            location: loc,
        })
    }

    /// Parse `name(params) { body }` (after `fn`) as a binding of a function literal
    fn parse_named_function(&mut self, is_public: bool, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier()?;
        let function = self.parse_function_rest(loc)?;

        Ok(AstNode::Assign {
            name,
            value: Box::new(function),
            is_public,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let condition = Box::new(self.parse_expression()?);
        let body = self.parse_block(CaptureMode::Shared)?;

        Ok(AstNode::If {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse return statement; a bare `return` yields nil
    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let expr = if self.check(&TokenKind::Semicolon) || self.check(&TokenKind::RBrace) {
            AstNode::Nil(loc)
        } else {
            self.parse_expression()?
        };

        Ok(AstNode::Return {
            expr: Box::new(expr),
            location: loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError};

    fn statements(source: &str) -> Vec<AstNode> {
        let program = parse(tokenize(source, "test").unwrap()).unwrap();
        program.scopes[program.root].statements.clone()
    }

    fn parse_error(source: &str) -> ParseError {
        parse(tokenize(source, "test").unwrap()).unwrap_err()
    }

    #[test]
    fn test_reassignment_forms() {
        let stmts = statements("x = 1; x += 2; x //= 3; x ^= 2;");

        let ops: Vec<BinOp> = stmts
            .iter()
            .map(|s| match s {
                AstNode::Reassign { op, .. } => *op,
                other => panic!("Expected reassignment, got {:?}", other),
            })
            .collect();
        assert_eq!(ops, vec![BinOp::Assign, BinOp::Add, BinOp::FloorDiv, BinOp::Pow]);
    }

    #[test]
    fn test_call_statement_is_not_reassignment() {
        let stmts = statements("f(1, 2);");
        assert!(matches!(&stmts[0], AstNode::Call { args, .. } if args.len() == 2));
    }

    #[test]
    fn test_public_binding_and_function() {
        let stmts = statements("pub let g = 1; pub fn h() { g };");

        assert!(matches!(&stmts[0], AstNode::Assign { name, is_public: true, .. } if name == "g"));
        match &stmts[1] {
            AstNode::Assign {
                name,
                value,
                is_public: true,
                ..
            } => {
                assert_eq!(name, "h");
                assert!(matches!(**value, AstNode::FunctionLiteral { ref params, .. } if params.is_empty()));
            }
            other => panic!("Expected public function binding, got {:?}", other),
        }
    }

    #[test]
    fn test_let_with_compound_operator_reads_existing_name() {
        let stmts = statements("let x += 1;");
        match &stmts[0] {
            AstNode::Assign { value, .. } => {
                assert!(matches!(**value, AstNode::BinaryOp { op: BinOp::Add, .. }));
            }
            other => panic!("Expected binding, got {:?}", other),
        }
    }

    #[test]
    fn test_if_statement_body_is_shared_scope() {
        let program = parse(tokenize("if 1 > 2 { print 1; };", "test").unwrap()).unwrap();
        match &program.scopes[program.root].statements[0] {
            AstNode::If { body, .. } => {
                assert_eq!(program.scopes[*body].capture, CaptureMode::Shared);
                assert_eq!(program.scopes[*body].parent, Some(program.root));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_return_yields_nil() {
        let program = parse(tokenize("let f = fn() { return; };", "test").unwrap()).unwrap();
        assert!(matches!(
            &program.scopes[1].statements[0],
            AstNode::Return { expr, .. } if matches!(**expr, AstNode::Nil(_))
        ));
    }

    #[test]
    fn test_statement_block_tail_is_not_promoted() {
        let program = parse(tokenize("{ print 1; 2 };", "test").unwrap()).unwrap();
        assert!(matches!(program.scopes[1].statements[1], AstNode::Number(..)));
    }

    #[test]
    fn test_scope_expression_tail_is_promoted() {
        let program = parse(tokenize("let v = { 2 };", "test").unwrap()).unwrap();
        assert!(matches!(program.scopes[1].statements[0], AstNode::Return { .. }));
    }

    #[test]
    fn test_empty_scope() {
        let program = parse(tokenize("", "test").unwrap()).unwrap();
        assert!(matches!(program.scopes[0].statements[..], [AstNode::Empty(_)]));
    }

    #[test]
    fn test_assignment_to_non_variable() {
        let err = parse_error("f() = 3;");
        assert_eq!(err.expected, "assignable variable");
    }

    #[test]
    fn test_pub_requires_let_or_fn() {
        let err = parse_error("pub x = 1;");
        assert_eq!(err.expected, "'let' or 'fn' after 'pub'");
    }

    #[test]
    fn test_let_requires_identifier() {
        let err = parse_error("let 3 = 4;");
        assert_eq!(err.expected, "identifier");
        assert_eq!(err.found, "number 3");
    }
}
