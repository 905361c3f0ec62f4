//! Interactive front end and terminal reporting
//!
//! The prompt reads one program at a time. A single line is a whole program;
//! a line starting with `>` opens a multi-line buffer that is closed by a
//! line reading `exit`. Every buffer runs from a clean global state. An empty
//! line or end of input leaves the prompt.
//!
//! The reporting helpers are shared with file mode in `main.rs`.

use crate::config::RunConfig;
use crate::diagnostic::Diagnostic;
use crate::interpreter::constants::GLOBAL_MEMORY_HEADER;
use crate::interpreter::Globals;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">";
pub const MULTILINE_END: &str = "exit";
pub const STDIN_LABEL: &str = "stdin";

/// Read one program from `input`. Returns `None` when the user quits.
pub fn read_program<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<String>> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let Some(entry) = read_line(input)? else {
        return Ok(None);
    };
    let stripped = entry.trim_start();
    if stripped.is_empty() {
        return Ok(None);
    }

    let Some(first) = stripped.strip_prefix('>') else {
        return Ok(Some(entry));
    };

    writeln!(output)?;
    writeln!(output, "TYPE '{}' TO END", MULTILINE_END)?;
    writeln!(output, " 1   {}", first.trim_start())?;

    let mut source = first.to_string();
    let mut line = 1;
    loop {
        line += 1;
        write!(output, " {}   ", line)?;
        output.flush()?;

        match read_line(input)? {
            Some(entry) if entry != MULTILINE_END => {
                source.push('\n');
                source.push_str(&entry);
            }
            _ => break,
        }
    }

    Ok(Some(source))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Run programs read from `input` until the user quits
pub fn run_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &RunConfig,
    colour: bool,
) -> io::Result<()> {
    // Output is written after each run so it lands on `output`
    let config = RunConfig {
        echo_output: false,
        ..config.clone()
    };

    while let Some(source) = read_program(input, output)? {
        writeln!(output)?;
        let execution = crate::execute(&source, STDIN_LABEL, &config);
        tracing::debug!(
            lines = execution.output.len(),
            success = execution.is_success(),
            "prompt run finished"
        );

        for line in &execution.output {
            writeln!(output, "{}", line.text)?;
        }
        if let Some(error) = &execution.error {
            write_diagnostic(output, &Diagnostic::from_error(error, &source, STDIN_LABEL), colour)?;
        }
        if config.show_globals {
            write_globals(output, &execution.globals, colour)?;
        }
    }

    Ok(())
}

/// Print a fault report
pub fn write_diagnostic<W: Write>(output: &mut W, diagnostic: &Diagnostic, colour: bool) -> io::Result<()> {
    if !colour {
        return writeln!(output, "{}", diagnostic);
    }

    writeln!(output, "{}", diagnostic.kind.header().red().bold())?;
    writeln!(
        output,
        "{}",
        format!("{}: Line {}", diagnostic.file_label, diagnostic.line).dark_grey()
    )?;
    writeln!(output, "{}", diagnostic.line_text)?;
    writeln!(output, "{}", diagnostic.caret.as_str().red().bold())?;
    writeln!(output, "{}", diagnostic.message.as_str().red())
}

/// Print the final global bindings, sorted by name
pub fn write_globals<W: Write>(output: &mut W, globals: &Globals, colour: bool) -> io::Result<()> {
    writeln!(output)?;
    if colour {
        writeln!(output, "{}", GLOBAL_MEMORY_HEADER.yellow())?;
    } else {
        writeln!(output, "{}", GLOBAL_MEMORY_HEADER)?;
    }

    for (name, value) in globals {
        if colour {
            writeln!(output, "{} = {}", name.as_str().cyan(), value.to_string().white())?;
        } else {
            writeln!(output, "{} = {}", name, value)?;
        }
    }
    writeln!(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompt(input: &str) -> String {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        run_prompt(&mut input, &mut output, &RunConfig::default(), false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_single_line_program() {
        let mut input = Cursor::new(b"let x = 1;\n".to_vec());
        let mut output = Vec::new();

        let program = read_program(&mut input, &mut output).unwrap();
        assert_eq!(program, Some("let x = 1;".to_string()));
        assert_eq!(String::from_utf8(output).unwrap(), ">");
    }

    #[test]
    fn test_multiline_program() {
        let mut input = Cursor::new(b">  let a = 1;\nlet b = a + 1;\nexit\n".to_vec());
        let mut output = Vec::new();

        let program = read_program(&mut input, &mut output).unwrap();
        assert_eq!(program, Some("  let a = 1;\nlet b = a + 1;".to_string()));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("TYPE 'exit' TO END"));
        assert!(shown.contains(" 1   let a = 1;"));
        assert!(shown.contains(" 2   "));
        assert!(shown.contains(" 3   "));
    }

    #[test]
    fn test_empty_line_and_eof_quit() {
        let mut output = Vec::new();
        assert_eq!(read_program(&mut Cursor::new(b"\n".to_vec()), &mut output).unwrap(), None);
        assert_eq!(read_program(&mut Cursor::new(Vec::new()), &mut output).unwrap(), None);
    }

    #[test]
    fn test_prompt_runs_and_reports_globals() {
        let shown = prompt("let b = 2; let a = 1; print a + b;\n\n");

        assert!(shown.contains("\n3\n"));
        let header = shown.find(GLOBAL_MEMORY_HEADER).unwrap();
        let a = shown.find("a = 1").unwrap();
        let b = shown.find("b = 2").unwrap();
        assert!(header < a && a < b);
    }

    #[test]
    fn test_each_program_starts_clean() {
        let shown = prompt("let x = 5;\nprint x;\n");

        assert!(shown.contains("Runtime Error"));
        assert!(shown.contains("Invalid Variable: x"));
    }

    #[test]
    fn test_plain_globals_listing() {
        let mut globals = Globals::new();
        globals.insert("n".to_string(), crate::memory::value::Value::Number(2.5));
        let mut output = Vec::new();
        write_globals(&mut output, &globals, false).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "\nGLOBAL MEMORY:\nn = 2.5\n\n");
    }
}
