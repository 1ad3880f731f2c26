// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [gazer]
/// state_dir = ".gazer"
/// suffix = ".gzr"
/// shell = "bash"
/// ```
///
/// The file and every key in it are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub gazer: GazerConfig,
}

/// `[gazer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GazerConfig {
    /// Directory holding `<runner>.pid`, `<runner>.bid` and `<runner>.log`.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// File-name suffix that marks a runner definition.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Interpreter used to launch runner files. Empty means the runner file
    /// is executed directly.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".gazer")
}

fn default_suffix() -> String {
    ".gzr".to_string()
}

fn default_shell() -> String {
    "bash".to_string()
}

impl Default for GazerConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            suffix: default_suffix(),
            shell: default_shell(),
        }
    }
}

impl GazerConfig {
    /// Interpreter to prefix the runner path with, if any.
    pub fn interpreter(&self) -> Option<&str> {
        let shell = self.shell.trim();
        if shell.is_empty() { None } else { Some(shell) }
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }
}
