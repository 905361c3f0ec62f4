// lt: runs ltscript programs from a file or an interactive prompt

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ltscript::config::{CliAction, RunConfig, USAGE, parse_args};
use ltscript::diagnostic::Diagnostic;
use ltscript::interpreter::constants::MAX_DEPTH_ENV;
use ltscript::repl::{run_prompt, write_diagnostic, write_globals};
use ltscript::ui::App;

/// Install a stderr log subscriber when `RUST_LOG` is set
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let env_depth = std::env::var(MAX_DEPTH_ENV).ok();
    let action = match parse_args(std::env::args().skip(1), env_depth.as_deref()) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let (config, file) = match action {
        CliAction::Help => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        CliAction::Run { config, file } => (config, file),
    };

    let result = match file {
        Some(path) => run_file(&path, &config),
        None => {
            let colour = io::stdout().is_terminal();
            let stdin = io::stdin();
            run_prompt(&mut stdin.lock(), &mut io::stdout(), &config, colour).map(|()| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a program file. Returns whether it finished without a fault.
fn run_file(path: &Path, config: &RunConfig) -> io::Result<bool> {
    let source = fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot read '{}': {}", path.display(), e)))?;
    let label = path.display().to_string();

    tracing::debug!(file = %label, bytes = source.len(), "running file");
    let execution = ltscript::execute(&source, &label, config);
    let success = execution.is_success();

    if config.viewer {
        run_viewer(App::new(execution, source, label))?;
        return Ok(success);
    }

    let mut stdout = io::stdout();
    let colour = stdout.is_terminal();
    if let Some(error) = &execution.error {
        stdout.flush()?;
        let diagnostic = Diagnostic::from_error(error, &source, &label);
        write_diagnostic(&mut io::stderr(), &diagnostic, io::stderr().is_terminal())?;
    }
    if config.show_globals {
        write_globals(&mut stdout, &execution.globals, colour)?;
    }

    Ok(success)
}

fn run_viewer(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
