//! Run configuration and command-line parsing for the `lt` binary

use crate::interpreter::constants::{DEFAULT_MAX_CALL_DEPTH, MAX_DEPTH_ENV};
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: lt [OPTIONS] [FILE]

Runs FILE, or starts an interactive prompt when no FILE is given.
At the prompt, start a line with '>' to enter several lines; type 'exit' to run them.

Options:
  --max-depth N   Maximum nested function calls (default 2000, env LT_MAX_DEPTH)
  --no-globals    Do not print GLOBAL MEMORY after a run
  --tui           Inspect the finished run in a terminal viewer (requires FILE)
  -h, --help      Show this help";

/// How a program is run and reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum number of nested function activations
    pub max_call_depth: usize,
    /// Write `print` output to stdout as it is produced
    pub echo_output: bool,
    /// Print the final global bindings after a run
    pub show_globals: bool,
    /// Open the terminal viewer after a run
    pub viewer: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            echo_output: true,
            show_globals: true,
            viewer: false,
        }
    }
}

impl RunConfig {
    /// Capture output without echoing or reporting anything
    pub fn quiet() -> Self {
        RunConfig {
            echo_output: false,
            show_globals: false,
            ..RunConfig::default()
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Run `file`, or the interactive prompt when `None`
    Run {
        config: RunConfig,
        file: Option<PathBuf>,
    },
    Help,
}

/// Usage errors (exit status 2)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: '{value}' (expected a positive integer)")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("--tui requires a FILE")]
    ViewerWithoutFile,
}

fn parse_depth(flag: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse arguments (without the program name). `env_depth` is the value of
/// the depth environment variable, if set; a `--max-depth` flag wins over it.
pub fn parse_args<I>(args: I, env_depth: Option<&str>) -> Result<CliAction, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = RunConfig::default();
    let mut file: Option<PathBuf> = None;
    let mut depth_flag: Option<usize> = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "--no-globals" => config.show_globals = false,
            "--tui" => config.viewer = true,
            "--max-depth" => {
                let value = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                depth_flag = Some(parse_depth(&arg, &value)?);
            }
            flag if flag.starts_with("--max-depth=") => {
                let value = &flag["--max-depth=".len()..];
                depth_flag = Some(parse_depth("--max-depth", value)?);
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(ConfigError::UnknownOption(flag.to_string()));
            }
            path => {
                if file.is_some() {
                    return Err(ConfigError::UnexpectedArgument(path.to_string()));
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    config.max_call_depth = match (depth_flag, env_depth) {
        (Some(depth), _) => depth,
        (None, Some(value)) => parse_depth(MAX_DEPTH_ENV, value)?,
        (None, None) => DEFAULT_MAX_CALL_DEPTH,
    };

    if config.viewer {
        if file.is_none() {
            return Err(ConfigError::ViewerWithoutFile);
        }
        // The viewer shows output in its own pane
        config.echo_output = false;
    }

    Ok(CliAction::Run { config, file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_starts_prompt() {
        assert_eq!(
            parse_args(args(&[]), None),
            Ok(CliAction::Run {
                config: RunConfig::default(),
                file: None
            })
        );
    }

    #[test]
    fn test_flags_and_file() {
        let action = parse_args(args(&["--max-depth", "50", "--no-globals", "prog.lt"]), None).unwrap();
        let CliAction::Run { config, file } = action else {
            panic!("Expected run action");
        };

        assert_eq!(config.max_call_depth, 50);
        assert!(!config.show_globals);
        assert_eq!(file, Some(PathBuf::from("prog.lt")));
    }

    #[test]
    fn test_env_depth_used_without_flag() {
        let CliAction::Run { config, .. } = parse_args(args(&["a.lt"]), Some("77")).unwrap() else {
            panic!("Expected run action");
        };
        assert_eq!(config.max_call_depth, 77);

        let CliAction::Run { config, .. } =
            parse_args(args(&["--max-depth=5", "a.lt"]), Some("77")).unwrap()
        else {
            panic!("Expected run action");
        };
        assert_eq!(config.max_call_depth, 5);
    }

    #[test]
    fn test_viewer_disables_echo() {
        let CliAction::Run { config, .. } = parse_args(args(&["--tui", "a.lt"]), None).unwrap() else {
            panic!("Expected run action");
        };
        assert!(config.viewer);
        assert!(!config.echo_output);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(parse_args(args(&["--tui"]), None), Err(ConfigError::ViewerWithoutFile));
        assert_eq!(
            parse_args(args(&["--max-depth"]), None),
            Err(ConfigError::MissingValue("--max-depth".to_string()))
        );
        assert!(matches!(
            parse_args(args(&["--max-depth", "zero"]), None),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_args(args(&["--max-depth", "0"]), None),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert_eq!(
            parse_args(args(&["--verbose"]), None),
            Err(ConfigError::UnknownOption("--verbose".to_string()))
        );
        assert_eq!(
            parse_args(args(&["a.lt", "b.lt"]), None),
            Err(ConfigError::UnexpectedArgument("b.lt".to_string()))
        );
        assert!(matches!(
            parse_args(args(&["a.lt"]), Some("many")),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(args(&["a.lt", "-h"]), None), Ok(CliAction::Help));
    }
}
