// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, GazerConfig};
use crate::errors::{GazerError, Result};

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GazerConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&contents)?;
    validate_config(&file.gazer)?;
    Ok(file.gazer)
}

/// Load `path` if it exists, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GazerConfig> {
    let path = path.as_ref();
    if path.is_file() {
        debug!(path = %path.display(), "loading config file");
        load_and_validate(path)
    } else {
        debug!(path = %path.display(), "no config file; using defaults");
        Ok(GazerConfig::default())
    }
}

/// Basic sanity checks on a loaded config.
pub fn validate_config(cfg: &GazerConfig) -> Result<()> {
    if cfg.state_dir.as_os_str().is_empty() {
        return Err(GazerError::ConfigError(
            "state_dir must not be empty".to_string(),
        ));
    }

    if cfg.suffix.len() < 2 || !cfg.suffix.starts_with('.') {
        return Err(GazerError::ConfigError(format!(
            "suffix must look like \".ext\", got {:?}",
            cfg.suffix
        )));
    }

    if cfg.suffix.contains('/') {
        return Err(GazerError::ConfigError(format!(
            "suffix must not contain a path separator, got {:?}",
            cfg.suffix
        )));
    }

    Ok(())
}

/// `Gazer.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Gazer.toml")
}
