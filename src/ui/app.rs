//! Viewer state and event loop

use crate::diagnostic::{line_number, Diagnostic};
use crate::Execution;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Globals,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> globals)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Globals,
            FocusedPane::Globals => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Globals,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Globals => FocusedPane::Output,
        }
    }
}

/// The viewer state
pub struct App {
    /// Result of the run being shown
    pub execution: Execution,

    /// The source code that was run
    pub source_code: String,

    /// File label shown in the status bar
    pub label: String,

    /// Fault report, when the run failed
    pub diagnostic: Option<Diagnostic>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,
    pub globals_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(execution: Execution, source_code: String, label: String) -> Self {
        let diagnostic = execution
            .error
            .as_ref()
            .map(|error| Diagnostic::from_error(error, &source_code, &label));

        let status_message = match &diagnostic {
            Some(diag) => format!("{} on line {}: {}", diag.kind.header(), diag.line, diag.message),
            None => format!(
                "Finished: {} line(s) printed, {} global(s)",
                execution.output.len(),
                execution.globals.len()
            ),
        };

        let mut app = App {
            execution,
            source_code,
            label,
            diagnostic,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            output_scroll: usize::MAX, // Clamped to the last page on first render
            globals_scroll: 0,
            should_quit: false,
            status_message,
        };
        // Start with the marked line a few rows below the top
        app.source_scroll = app.marked_line().saturating_sub(4);
        app
    }

    /// Line of the fault, or of the last statement executed
    pub fn marked_line(&self) -> usize {
        match &self.diagnostic {
            Some(diag) => diag.line,
            None => line_number(&self.source_code, self.execution.last_location.offset),
        }
    }

    /// Run the viewer until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Right column: Output (top) | Globals (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let marked_line = self.marked_line();
        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            marked_line,
            self.diagnostic.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_output_pane(
            frame,
            right_rows[0],
            &self.execution.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_globals_pane(
            frame,
            right_rows[1],
            &self.execution.globals,
            self.focused_pane == FocusedPane::Globals,
            &mut self.globals_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.label,
            &self.status_message,
            self.diagnostic.is_some(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Globals => &mut self.globals_scroll,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(source: &str) -> App {
        let execution = crate::execute(source, "view.lt", &RunConfig::quiet());
        App::new(execution, source.to_string(), "view.lt".to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("print 1;");
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Output);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Globals);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Globals);
    }

    #[test]
    fn test_scroll_and_quit() {
        let mut app = app("print 1;");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.globals_scroll, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.globals_scroll, 0);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_fault_line_is_marked() {
        let app = app("let a = 1;\nlet b = a + nope;\nprint b;");

        assert_eq!(app.marked_line(), 2);
        assert!(app.status_message.contains("Invalid Variable: nope"));
    }

    #[test]
    fn test_renders_all_panes() {
        let mut app = app("let total = 3;\nprint total;");
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Source Code"));
        assert!(text.contains("Output"));
        assert!(text.contains("Global Memory"));
        assert!(text.contains("total = 3"));
        assert!(text.contains("OK"));
    }
}
