//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, scope bookkeeping
//! - `statements`: statement forms and scope bodies
//! - `expressions`: expressions with precedence climbing
//!
//! # Scopes
//!
//! Every `{ ... }` becomes a [`ScopeTemplate`] stored in the program's arena.
//! The parser keeps an explicit stack of the templates currently being built,
//! so each nested scope records its lexical parent at parse time.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Expected {expected}, found {found}")]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub location: SourceLocation,
}

/// Parse a token sequence produced by [`crate::parser::lexer::tokenize`]
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(scopes = program.scopes.len(), "parsed program");
    Ok(program)
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) scopes: Vec<ScopeTemplate>,
    pub(crate) scope_stack: Vec<ScopeId>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let ends_with_eof = tokens
            .last()
            .is_some_and(|t| matches!(t.kind, TokenKind::Eof));
        if !ends_with_eof {
            let end = tokens.last().map_or(0, |t| t.location.offset);
            tokens.push(Token::new(TokenKind::Eof, end));
        }
        Self {
            tokens,
            position: 0,
            scopes: Vec::new(),
            scope_stack: Vec::new(),
        }
    }

    /// Parse the entire program: one outer scope followed by end of file
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let root = self.parse_scope(CaptureMode::Fresh)?;

        if !self.is_at_end() {
            return Err(self.error("end of file"));
        }

        Ok(Program {
            scopes: self.scopes,
            root,
        })
    }

    // ===== Scope bookkeeping =====

    /// Reserve a template slot and make it the innermost in-progress scope
    pub(crate) fn open_scope(&mut self, capture: CaptureMode, location: SourceLocation) -> ScopeId {
        let id = self.scopes.len();
        let parent = self.scope_stack.last().copied();
        self.scopes.push(ScopeTemplate {
            id,
            parent,
            capture,
            statements: Vec::new(),
            location,
        });
        self.scope_stack.push(id);
        id
    }

    /// Finish the innermost in-progress scope, which must be `id`
    pub(crate) fn close_scope(&mut self, id: ScopeId, statements: Vec<AstNode>) -> Result<(), ParseError> {
        match self.scope_stack.pop() {
            Some(open) if open == id => {
                self.scopes[id].statements = statements;
                Ok(())
            }
            _ => Err(self.error("end of the innermost scope")),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_ahead(&self, n: usize, kind: &TokenKind) -> bool {
        self.peek_ahead(n)
            .is_some_and(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never moves past it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    /// Build an error describing what was expected at the current token
    pub(crate) fn error(&self, expected: &str) -> ParseError {
        ParseError {
            expected: expected.to_string(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error("identifier"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(tokenize(source, "test").unwrap())
    }

    #[test]
    fn test_parse_assignment_and_print() {
        let program = parse_source("let x = 2; print x;").unwrap();
        let root = program.root_scope().unwrap();

        assert_eq!(root.capture, CaptureMode::Fresh);
        assert_eq!(root.parent, None);
        assert_eq!(root.statements.len(), 2);
        assert!(matches!(
            &root.statements[0],
            AstNode::Assign { name, is_public: false, .. } if name == "x"
        ));
        assert!(matches!(&root.statements[1], AstNode::Print { .. }));
    }

    #[test]
    fn test_nested_scope_records_parent() {
        let program = parse_source("{ { let a = 1; }; };").unwrap();

        assert_eq!(program.scopes.len(), 3);
        assert_eq!(program.scopes[1].parent, Some(program.root));
        assert_eq!(program.scopes[2].parent, Some(1));
        assert_eq!(program.scopes[2].capture, CaptureMode::Shared);
    }

    #[test]
    fn test_function_body_is_copied_scope() {
        let program = parse_source("let f = fn(a) { a }; let v = { 1 };").unwrap();

        assert_eq!(program.scopes[1].capture, CaptureMode::Copied);
        assert_eq!(program.scopes[2].capture, CaptureMode::Shared);
    }

    #[test]
    fn test_closed_scopes_keep_their_statements() {
        let mut parser = Parser::new(tokenize("{ print 1; { print 2; print 3; }; };", "test").unwrap());
        let root = parser.parse_scope(CaptureMode::Fresh).unwrap();

        assert!(parser.scope_stack.is_empty());
        assert_eq!(root, 0);
        assert_eq!(parser.scopes[1].statements.len(), 2);
        assert_eq!(parser.scopes[2].statements.len(), 2);
        assert!(parser.scopes[2]
            .statements
            .iter()
            .all(|stmt| matches!(stmt, AstNode::Print { .. })));
    }

    #[test]
    fn test_closing_a_scope_out_of_order_is_an_error() {
        let mut parser = Parser::new(tokenize("print 1;", "test").unwrap());
        let outer = parser.open_scope(CaptureMode::Fresh, SourceLocation::default());
        let inner = parser.open_scope(CaptureMode::Shared, SourceLocation::default());

        let err = parser.close_scope(outer, Vec::new()).unwrap_err();
        assert_eq!(err.expected, "end of the innermost scope");
        assert!(parser.close_scope(inner, Vec::new()).is_err());
        assert!(parser.scope_stack.is_empty());
    }

    #[test]
    fn test_trailing_expression_becomes_return() {
        let program = parse_source("let f = fn(a) { a + 1 };").unwrap();
        let body = &program.scopes[1];

        assert_eq!(body.statements.len(), 1);
        assert!(matches!(body.statements[0], AstNode::Return { .. }));
    }

    #[test]
    fn test_terminated_expression_is_not_promoted() {
        let program = parse_source("let f = fn(a) { a + 1; };").unwrap();
        let body = &program.scopes[1];

        assert!(matches!(body.statements[0], AstNode::BinaryOp { .. }));
    }

    #[test]
    fn test_missing_semicolon_before_identifier() {
        let err = parse_source("let a = 1 b = 2;").unwrap_err();
        assert_eq!(err.expected, "';'");
        assert_eq!(err.found, "identifier 'b'");
        assert_eq!(err.location.offset, 10);
    }

    #[test]
    fn test_unmatched_brace() {
        let err = parse_source("{ print 1;").unwrap_err();
        assert_eq!(err.expected, "'}'");
        assert_eq!(err.found, "end of file");
    }

    #[test]
    fn test_extra_closing_brace() {
        let err = parse_source("print 1; }").unwrap_err();
        assert_eq!(err.expected, "end of file");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "pub let g = 1; fn f(x) { if x > 1 { return x; }; g }; print f(2) ^ 2;";
        assert_eq!(parse_source(source).unwrap(), parse_source(source).unwrap());
    }
}
