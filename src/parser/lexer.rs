//! Lexer (tokenizer) for script source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The whole program is treated as the body of one outer scope: a synthetic
//! `{` is emitted before the first real token and a synthetic `}` before the
//! end-of-file sentinel, both positioned so that every offset still indexes
//! the caller's original text.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Token kinds produced by the lexer. Literal kinds carry their payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,

    // Keywords
    Print,
    Let,
    Pub,
    Return,
    Fn,
    If,
    And,
    Or,
    Not,

    // Operators
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    SlashSlash, // //
    Caret,      // ^
    Percent,    // %
    Eq,         // =
    EqEq,       // ==
    Bang,       // !
    BangEq,     // !=
    Lt,         // <
    Le,         // <=
    Gt,         // >
    Ge,         // >=

    // Punctuation
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,

    Eof,
}

impl TokenKind {
    /// Source text that lexes back to this exact kind and payload
    pub fn to_source(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("{}", n),
            TokenKind::Str(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                // A decimal escape runs until the first non-digit, so a digit
                // directly after one must itself be escaped.
                let mut after_decimal_escape = false;
                for ch in s.chars() {
                    match ch {
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        c if c.is_control() || (after_decimal_escape && c.is_ascii_digit()) => {
                            out.push_str(&format!("\\{}", c as u32));
                            after_decimal_escape = true;
                            continue;
                        }
                        c => out.push(c),
                    }
                    after_decimal_escape = false;
                }
                out.push('"');
                out
            }
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Eof => String::new(),
            other => other.keyword_or_symbol().to_string(),
        }
    }

    fn keyword_or_symbol(&self) -> &'static str {
        match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Print => "print",
            TokenKind::Let => "let",
            TokenKind::Pub => "pub",
            TokenKind::Return => "return",
            TokenKind::Fn => "fn",
            TokenKind::If => "if",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::SlashSlash => "//",
            TokenKind::Caret => "^",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::Ident(_)
            | TokenKind::Eof => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string \"{}\"", s.escape_debug()),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", other.keyword_or_symbol()),
        }
    }
}

/// A single lexed token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Token {
            kind,
            location: SourceLocation::new(offset),
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn to_source(&self) -> String {
        self.kind.to_source()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        LexError {
            message: message.into(),
            location: SourceLocation::new(offset),
        }
    }
}

fn keyword(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "print" => TokenKind::Print,
        "let" => TokenKind::Let,
        "pub" => TokenKind::Pub,
        "return" => TokenKind::Return,
        "fn" => TokenKind::Fn,
        "if" => TokenKind::If,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        _ => return None,
    };
    Some(kind)
}

fn operator(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '^' => TokenKind::Caret,
        '%' => TokenKind::Percent,
        '=' => TokenKind::Eq,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '!' => TokenKind::Bang,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        _ => return None,
    };
    Some(kind)
}

/// Tokenize `source` into a token sequence wrapped in an outer scope.
///
/// `file_label` is only used for log output; diagnostics are rendered from
/// the error's location by [`crate::diagnostic`].
pub fn tokenize(source: &str, file_label: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).tokenize()?;
    tracing::debug!(file = file_label, tokens = tokens.len(), "lexed source");
    Ok(tokens)
}

/// Single forward scanner with one character of lookahead
pub struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![Token::new(TokenKind::LBrace, 0)];

        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                tokens.push(self.number_literal(offset)?);
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                tokens.push(self.identifier_or_keyword(offset));
            } else if ch == '"' || ch == '\'' {
                tokens.push(self.string_literal(offset, ch)?);
            } else if ch == '#' {
                self.skip_comment();
            } else if ch.is_whitespace() {
                self.chars.next();
            } else if let Some(kind) = operator(ch) {
                self.chars.next();
                tokens.push(Token::new(self.compound_operator(kind), offset));
            } else {
                return Err(LexError::new(
                    format!("Invalid character: '{}'", ch),
                    offset,
                ));
            }
        }

        let end = self.source.len();
        tokens.push(Token::new(TokenKind::RBrace, end));
        tokens.push(Token::new(TokenKind::Eof, end));
        Ok(tokens)
    }

    /// Upgrade `! = < >` followed by `=`, and `/` followed by `/`
    fn compound_operator(&mut self, kind: TokenKind) -> TokenKind {
        let next = self.chars.peek().map(|&(_, c)| c);
        let upgraded = match (&kind, next) {
            (TokenKind::Bang, Some('=')) => TokenKind::BangEq,
            (TokenKind::Eq, Some('=')) => TokenKind::EqEq,
            (TokenKind::Lt, Some('=')) => TokenKind::Le,
            (TokenKind::Gt, Some('=')) => TokenKind::Ge,
            (TokenKind::Slash, Some('/')) => TokenKind::SlashSlash,
            _ => return kind,
        };
        self.chars.next();
        upgraded
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(&mut self, start: usize) -> Result<Token, LexError> {
        let mut end = start;
        let mut seen_point = false;

        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch == '.' {
                if seen_point {
                    return Err(LexError::new(
                        "Invalid number literal: more than one decimal point",
                        offset,
                    ));
                }
                seen_point = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            end = offset + ch.len_utf8();
            self.chars.next();
        }

        let text = &self.source[start..end];
        let value = text.parse::<f64>().map_err(|_| {
            LexError::new(format!("Invalid number literal: '{}'", text), start)
        })?;

        Ok(Token::new(TokenKind::Number(value), start))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                end = offset + 1;
                self.chars.next();
            } else {
                break;
            }
        }

        let ident = &self.source[start..end];
        let kind = keyword(ident).unwrap_or_else(|| TokenKind::Ident(ident.to_string()));
        Token::new(kind, start)
    }

    /// Parse string literal delimited by `quote`
    fn string_literal(&mut self, start: usize, quote: char) -> Result<Token, LexError> {
        self.chars.next(); // opening quote
        let mut string = String::new();

        while let Some((offset, ch)) = self.chars.next() {
            if ch == quote {
                return Ok(Token::new(TokenKind::Str(string), start));
            }

            if ch != '\\' {
                string.push(ch);
                continue;
            }

            let (escape_offset, escaped) = self.chars.next().ok_or_else(|| {
                LexError::new("Unterminated string literal", start)
            })?;

            match escaped {
                'n' => string.push('\n'),
                't' => string.push('\t'),
                '\\' => string.push('\\'),
                '"' | '\'' => string.push(escaped),
                d if d.is_ascii_digit() => {
                    let mut code = d.to_digit(10).unwrap_or(0);
                    while let Some(&(_, next)) = self.chars.peek() {
                        let Some(digit) = next.to_digit(10) else {
                            break;
                        };
                        code = code.saturating_mul(10).saturating_add(digit);
                        self.chars.next();
                    }
                    let decoded = char::from_u32(code).ok_or_else(|| {
                        LexError::new(
                            format!("Invalid character code in escape: \\{}", code),
                            offset,
                        )
                    })?;
                    string.push(decoded);
                }
                other => {
                    return Err(LexError::new(
                        format!("Unknown escape sequence: \\{}", other),
                        escape_offset,
                    ));
                }
            }
        }

        Err(LexError::new("Unterminated string literal", start))
    }

    /// Skip a `#` comment up to (not including) the end of the line
    fn skip_comment(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            self.chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source, "test")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("let x = 2;");

        assert_eq!(
            tokens,
            vec![
                TokenKind::LBrace,
                TokenKind::Let,
                TokenKind::Ident("x".to_string()),
                TokenKind::Eq,
                TokenKind::Number(2.0),
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("== != <= >= // < > ! = /");

        assert_eq!(
            &tokens[1..11],
            &[
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::SlashSlash,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Bang,
                TokenKind::Eq,
                TokenKind::Slash,
            ]
        );
    }

    #[test]
    fn test_compound_assignment_is_two_tokens() {
        let tokens = kinds("x += 1");
        assert_eq!(tokens[2], TokenKind::Plus);
        assert_eq!(tokens[3], TokenKind::Eq);
    }

    #[test]
    fn test_keywords() {
        let tokens = kinds("true false print let pub return fn if and or not nil");
        assert_eq!(tokens[1], TokenKind::True);
        assert_eq!(tokens[2], TokenKind::False);
        assert_eq!(tokens[5], TokenKind::Pub);
        assert_eq!(tokens[11], TokenKind::Not);
        assert_eq!(tokens[12], TokenKind::Ident("nil".to_string()));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("42 3.5 .5 7.");
        assert_eq!(tokens[1], TokenKind::Number(42.0));
        assert_eq!(tokens[2], TokenKind::Number(3.5));
        assert_eq!(tokens[3], TokenKind::Number(0.5));
        assert_eq!(tokens[4], TokenKind::Number(7.0));
    }

    #[test]
    fn test_two_decimal_points_is_an_error() {
        let err = tokenize("let x = 1.2.3;", "test").unwrap_err();
        assert!(err.message.contains("more than one decimal point"));
        assert_eq!(err.location.offset, 11);
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("let x = 1; # trailing comment\nprint x; # at end");

        assert_eq!(tokens[6], TokenKind::Print);
        assert_eq!(tokens[7], TokenKind::Ident("x".to_string()));
        assert_eq!(tokens[8], TokenKind::Semicolon);
        assert_eq!(tokens[9], TokenKind::RBrace);
    }

    #[test]
    fn test_string_literal_escapes() {
        let tokens = kinds(r#""hello\nworld" 'it\'s' "\65\66c" "back\\slash""#);

        assert_eq!(tokens[1], TokenKind::Str("hello\nworld".to_string()));
        assert_eq!(tokens[2], TokenKind::Str("it's".to_string()));
        assert_eq!(tokens[3], TokenKind::Str("ABc".to_string()));
        assert_eq!(tokens[4], TokenKind::Str("back\\slash".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("print \"oops;", "test").unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location.offset, 6);
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("let a = 1 @ 2;", "test").unwrap_err();
        assert_eq!(err.message, "Invalid character: '@'");
        assert_eq!(err.location.offset, 10);
    }

    #[test]
    fn test_offsets_are_monotonic_and_wrap_the_source() {
        let source = "let a = 1;\nprint a;";
        let tokens = tokenize(source, "test").unwrap();

        assert_eq!(tokens.first().map(|t| t.location.offset), Some(0));
        assert_eq!(tokens.last().map(|t| t.location.offset), Some(source.len()));
        assert!(tokens
            .windows(2)
            .all(|w| w[0].location.offset <= w[1].location.offset));
    }

    #[test]
    fn test_to_source_relexes() {
        let source = r#"fn f(a) { return a // 2 >= "x\ty"; }"#;
        let tokens = kinds(source);
        let rebuilt: Vec<String> = tokens.iter().map(TokenKind::to_source).collect();
        let relexed = kinds(&rebuilt[1..rebuilt.len() - 2].join(" "));
        assert_eq!(tokens, relexed);
    }
}
