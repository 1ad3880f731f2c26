// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is something the front end reports to the user before
//! exiting non-zero. Lifecycle precondition failures (`AlreadyRunning`,
//! `NotRunning`) leave persisted state untouched.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazerError {
    #[error("Process with pid {pid} already running")]
    AlreadyRunning { runner: String, pid: u32 },

    #[error("Runner '{runner}' not running")]
    NotRunning { runner: String },

    #[error("No '*{suffix}' runner files found!")]
    NoRunners { suffix: String },

    #[error("Runner file for '{0}' not found.")]
    RunnerNotFound(String),

    #[error("Multiple '*{suffix}' runner files found, specify runner name.")]
    AmbiguousRunner { suffix: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GazerError {
    /// Process exit code to report for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, GazerError>;
