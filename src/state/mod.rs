// src/state/mod.rs

//! Persisted per-runner state.
//!
//! A [`RunRecord`] exists for a runner exactly when a start has been issued
//! without a matching stop. Whether its process is still alive is a separate
//! question answered by the `exec` layer; a record may be stale.
//!
//! - [`file`] stores each record as three files in a state directory.

pub mod file;

use std::path::PathBuf;

use crate::errors::Result;
use crate::run_id::RunId;

pub use file::FileStateStore;

/// Everything persisted about a runner's most recent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub pid: u32,
    pub run_id: RunId,
    pub log_path: PathBuf,
}

/// Storage for run records, keyed by runner name.
///
/// Only one invocation is expected to touch a given runner at a time; there is
/// no locking across processes.
pub trait StateStore {
    /// Location of the runner's captured stdout/stderr.
    fn log_path(&self, runner: &str) -> PathBuf;

    /// The complete record for `runner`, or `None` when there is no record or
    /// only a partial/malformed one.
    fn load(&self, runner: &str) -> Result<Option<RunRecord>>;

    /// Persist pid and run id; the log item is created if missing.
    fn save(&self, runner: &str, pid: u32, run_id: &RunId) -> Result<RunRecord>;

    /// Remove every persisted item for `runner`. Missing items are fine.
    fn delete(&self, runner: &str) -> Result<()>;

    /// Whether any item for `runner` is present, complete or not.
    fn has_leftovers(&self, runner: &str) -> bool;
}
