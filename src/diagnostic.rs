//! Fault reports
//!
//! A [`Diagnostic`] pins a fault to a line of the source: the line number,
//! the line's text, a caret under the faulting column and the message. The
//! `Display` form is plain text; colour is added by the front end.

use crate::Error;
use std::fmt;

/// Which stage reported the fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Lex,
    Parse,
    Runtime,
}

impl FaultKind {
    pub fn header(self) -> &'static str {
        match self {
            FaultKind::Lex => "Lexing Error",
            FaultKind::Parse => "Parse Error",
            FaultKind::Runtime => "Runtime Error",
        }
    }
}

impl From<&Error> for FaultKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::Lex(_) => FaultKind::Lex,
            Error::Parse(_) => FaultKind::Parse,
            Error::Runtime(_) => FaultKind::Runtime,
        }
    }
}

/// 1-based line containing byte `offset` of `source`
pub fn line_number(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    source[..offset].matches('\n').count() + 1
}

/// A fault located in its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: FaultKind,
    pub file_label: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
    pub line_text: String,
    /// Whitespace up to the column, then `^`
    pub caret: String,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(error: &Error, source: &str, file_label: &str) -> Self {
        Self::at(
            FaultKind::from(error),
            error.location().offset,
            error.to_string(),
            source,
            file_label,
        )
    }

    /// Build a diagnostic for a byte offset into `source`
    pub fn at(kind: FaultKind, offset: usize, message: String, source: &str, file_label: &str) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[offset..]
            .find('\n')
            .map_or(source.len(), |i| offset + i);
        let line_text = source[line_start..line_end].trim_end_matches('\r');
        let line = line_number(source, line_start);

        // Keep tabs so the caret lines up with the printed line
        let mut caret: String = source[line_start..offset]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let column = caret.chars().count() + 1;
        caret.push('^');

        Diagnostic {
            kind,
            file_label: file_label.to_string(),
            line,
            column,
            line_text: line_text.to_string(),
            caret,
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind.header())?;
        writeln!(f, "{}: Line {}", self.file_label, self.line)?;
        writeln!(f, "{}", self.line_text)?;
        writeln!(f, "{}", self.caret)?;
        write!(f, "{}", self.message)
    }
}
