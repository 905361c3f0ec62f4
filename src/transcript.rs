//! Capture of `print` output
//!
//! Every `print` statement appends one [`OutputLine`] to the [`Transcript`],
//! tagged with the location of the statement that produced it. When echo is
//! enabled each line is also written to stdout as soon as it is produced, so
//! a long-running program streams its output.

use crate::parser::ast::SourceLocation;
use std::io::Write;

/// A line of program output with source location tracking
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLine {
    pub text: String,
    pub location: SourceLocation,
}

/// Ordered record of everything a run printed
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub lines: Vec<OutputLine>,
    echo: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript that also writes each line to stdout
    pub fn echoing() -> Self {
        Transcript {
            lines: Vec::new(),
            echo: true,
        }
    }

    /// Record one printed line
    pub fn print(&mut self, text: String, location: SourceLocation) {
        if self.echo {
            let mut stdout = std::io::stdout().lock();
            // A closed stdout must not abort the run; the line is still recorded
            let _ = writeln!(stdout, "{}", text);
            let _ = stdout.flush();
        }
        self.lines.push(OutputLine { text, location });
    }

    /// Get all lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_order_and_location() {
        let mut transcript = Transcript::new();
        transcript.print("a".to_string(), SourceLocation::new(0));
        transcript.print("b".to_string(), SourceLocation::new(9));

        assert_eq!(transcript.get_output(), vec!["a", "b"]);
        assert_eq!(transcript.lines[1].location.offset, 9);
    }

    #[test]
    fn test_embedded_newlines_stay_in_one_entry() {
        let mut transcript = Transcript::new();
        transcript.print("x\ny".to_string(), SourceLocation::new(0));

        assert_eq!(transcript.len(), 1);
    }
}
