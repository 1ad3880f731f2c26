// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The positional arguments are deliberately collected as a plain list and
//! interpreted by [`Invocation::from_positionals`], so that every malformed
//! invocation exits with status 1 and a usage hint rather than clap's own
//! exit code.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::errors::{GazerError, Result};

pub const USAGE: &str = "Usage: gazer start|stop|restart|status\n   or: gazer <runner-name> start|stop|restart|status";

/// Command-line arguments for `gazer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gazer",
    version,
    about = "Start, stop and restart background runner scripts.",
    long_about = None
)]
pub struct CliArgs {
    /// `[RUNNER] ACTION`. Leave empty for the interactive menu.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Path to the optional config file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Directory holding pid, run-id and log files. Overrides the config file.
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GAZER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Do not print the banner.
    #[arg(long)]
    pub no_banner: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Lifecycle action requested for a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Status,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "restart" => Ok(Action::Restart),
            "status" => Ok(Action::Status),
            other => Err(format!(
                "Invalid action '{other}'. Use start, stop, restart or status."
            )),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
            Action::Status => "status",
        };
        f.write_str(s)
    }
}

/// What the user asked for, after interpreting the positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No positionals: show the interactive menu.
    Interactive,
    /// `ACTION` or `RUNNER ACTION`.
    Inline {
        runner: Option<String>,
        action: Action,
    },
}

impl Invocation {
    pub fn from_positionals(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Invocation::Interactive),
            [action] => {
                let action = action.parse::<Action>().map_err(|_| {
                    GazerError::InvalidArguments(format!("Invalid argument.\n{USAGE}"))
                })?;
                Ok(Invocation::Inline {
                    runner: None,
                    action,
                })
            }
            [runner, action] => {
                let action = action
                    .parse::<Action>()
                    .map_err(GazerError::InvalidArguments)?;
                Ok(Invocation::Inline {
                    runner: Some(runner.clone()),
                    action,
                })
            }
            _ => Err(GazerError::InvalidArguments(format!(
                "Too many arguments.\n{USAGE}"
            ))),
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
