//! Expression parsing implementation
//!
//! This module handles parsing of expressions using one precedence level per
//! method, lowest binding first:
//!
//! ```text
//! or → and → not / ! → == != < <= > >= → + - → * / // % → ^ → unary + - → call → primary
//! ```
//!
//! # Supported Expressions
//!
//! - Literals: numbers, strings, `true`, `false`
//! - Identifiers
//! - Function literals: `fn(a, b) { ... }`
//! - Nested scopes used as values: `{ ...; value }`
//! - Calls, which chain: `f(1)(2)`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        ensure_sufficient_stack(|| self.parse_logical_or())
    }

    /// Parse logical OR (`or`)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&TokenKind::Or) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_logical_and()?);
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (`and`)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_logical_not()?;

        while self.match_token(&TokenKind::And) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_logical_not()?);
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical NOT (`not x`, `!x`), right-associative
    fn parse_logical_not(&mut self) -> Result<AstNode, ParseError> {
        if self.match_token(&TokenKind::Not) || self.match_token(&TokenKind::Bang) {
            let loc = self.previous_location();
            let operand = Box::new(ensure_sufficient_stack(|| self.parse_logical_not())?);
            return Ok(AstNode::UnaryOp {
                op: UnOp::Not,
                operand,
                location: loc,
            });
        }

        self.parse_relational()
    }

    /// Parse comparison and equality (`== != < <= > >=`)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::Ne,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let loc = self.previous_location();
            let right = Box::new(self.parse_additive()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (`+ -`)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            // `x + = 1` is a compound reassignment, not an operand
            if self.check_ahead(1, &TokenKind::Eq) {
                break;
            }
            self.advance();
            let loc = self.previous_location();
            let right = Box::new(self.parse_multiplicative()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (`* / // %`)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            if self.check_ahead(1, &TokenKind::Eq) {
                break;
            }
            self.advance();
            let loc = self.previous_location();
            let right = Box::new(self.parse_exponent()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse exponent (`^`), left-associative over unary operands
    fn parse_exponent(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        while self.check(&TokenKind::Caret) && !self.check_ahead(1, &TokenKind::Eq) {
            self.advance();
            let loc = self.previous_location();
            let right = Box::new(self.parse_unary()?);
            left = AstNode::BinaryOp {
                op: BinOp::Pow,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary prefix (`+x`, `-x`)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnOp::Pos,
            TokenKind::Minus => UnOp::Neg,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let loc = self.previous_location();
        let operand = Box::new(ensure_sufficient_stack(|| self.parse_unary())?);

        Ok(AstNode::UnaryOp {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse call postfix: `primary(args)(args)...`
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.match_token(&TokenKind::LParen) {
            let loc = self.previous_location();
            let args = self.parse_arguments()?;
            expr = AstNode::Call {
                callee: Box::new(expr),
                args,
                location: loc,
            };
        }

        Ok(expr)
    }

    /// Parse comma-separated call arguments after `(`, consuming `)`
    fn parse_arguments(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(&TokenKind::RParen, "')' after arguments")?;
        Ok(args)
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        let node = match &self.peek().kind {
            TokenKind::Number(n) => AstNode::Number(*n, loc),
            TokenKind::Str(s) => AstNode::StringLiteral(s.clone(), loc),
            TokenKind::True => AstNode::Boolean(true, loc),
            TokenKind::False => AstNode::Boolean(false, loc),
            TokenKind::Ident(name) => AstNode::Variable(name.clone(), loc),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(&TokenKind::RParen, "')'")?;
                return Ok(expr);
            }
            TokenKind::Fn => {
                self.advance();
                return self.parse_function_rest(loc);
            }
            TokenKind::LBrace => {
                let id = self.parse_scope(CaptureMode::Shared)?;
                return Ok(AstNode::Scope { id, location: loc });
            }
            _ => return Err(self.error("expression")),
        };

        self.advance();
        Ok(node)
    }

    /// Parse `(params) { body }` after `fn`
    pub(crate) fn parse_function_rest(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let params = self.parse_parameter_list()?;
        // Each call runs in a snapshot of the closure's captured store
        let body = self.parse_scope(CaptureMode::Copied)?;

        Ok(AstNode::FunctionLiteral {
            params,
            body,
            location: loc,
        })
    }

    /// Parse `(a, b, c)`; only identifiers are accepted
    fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_token(&TokenKind::LParen, "'(' before parameters")?;
        let mut params = Vec::new();

        if !self.check(&TokenKind::RParen) {
            loop {
                match &self.peek().kind {
                    TokenKind::Ident(name) => {
                        params.push(name.clone());
                        self.advance();
                    }
                    _ => return Err(self.error("parameter name")),
                }
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(&TokenKind::RParen, "')' after parameters")?;
        Ok(params)
    }
}
