// src/discovery.rs

//! Runner discovery: which `*.gzr` files in the working directory can be
//! started, and which one the user meant.
//!
//! Discovery is re-run on every invocation; nothing is cached between runs of
//! the tool.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{GazerError, Result};
use crate::fs::FileSystem;

/// A runner definition found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    /// File name with the suffix stripped; used for display, matching and as
    /// the namespace of the runner's persisted state.
    pub name: String,
    /// Path of the executable definition.
    pub path: PathBuf,
}

impl Runner {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// List regular files in `dir` whose name ends with `suffix`, sorted by file
/// name.
pub fn discover_runners(fs: &dyn FileSystem, dir: &Path, suffix: &str) -> Result<Vec<Runner>> {
    let mut runners: Vec<Runner> = fs
        .read_dir(dir)?
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?.to_string();
            let name = file_name.strip_suffix(suffix)?;
            if name.is_empty() || !fs.is_file(&path) {
                return None;
            }
            Some(Runner::new(name, path))
        })
        .collect();

    runners.sort_by_key(|r| r.file_name());
    debug!(
        dir = %dir.display(),
        suffix,
        found = runners.len(),
        "discovered runners"
    );
    Ok(runners)
}

/// Pick the runner an inline command refers to.
///
/// Without an explicit name there must be exactly one candidate. A requested
/// name matches either the display name or the full file name.
pub fn select_runner<'a>(
    runners: &'a [Runner],
    requested: Option<&str>,
    suffix: &str,
) -> Result<&'a Runner> {
    if runners.is_empty() {
        return Err(GazerError::NoRunners {
            suffix: suffix.to_string(),
        });
    }

    match requested {
        None => match runners {
            [only] => Ok(only),
            _ => Err(GazerError::AmbiguousRunner {
                suffix: suffix.to_string(),
            }),
        },
        Some(name) => runners
            .iter()
            .find(|r| r.name == name || r.file_name() == name)
            .ok_or_else(|| GazerError::RunnerNotFound(name.to_string())),
    }
}
