// src/supervisor.rs

//! Runner lifecycle: the start / stop / restart state machine.
//!
//! Per runner there are two states:
//!
//! - **Stopped**: no complete run record, or its pid is not alive.
//! - **Running**: a complete run record whose pid is alive.
//!
//! Every query goes back to the store and the OS; nothing is cached in the
//! supervisor, so a record left behind by a process that died on its own is
//! seen as Stopped on the next call.

use std::fmt;

use tracing::{debug, info, warn};

use crate::discovery::Runner;
use crate::errors::{GazerError, Result};
use crate::exec::{ProcessBackend, SpawnRequest};
use crate::run_id::RunId;
use crate::state::{RunRecord, StateStore};

/// Observed lifecycle state of a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerState {
    Stopped,
    Running(RunRecord),
}

impl RunnerState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunnerState::Running(_))
    }
}

/// Outcome of a successful stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReport {
    pub pid: u32,
    pub run_id: RunId,
    /// Group that received SIGKILL; `None` if it had already vanished.
    pub pgid: Option<i32>,
}

/// Outcome of a successful restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    /// `None` when the runner was not running beforehand.
    pub stopped: Option<StopReport>,
    pub started: RunRecord,
}

/// Coordinates a [`StateStore`] and a [`ProcessBackend`].
pub struct Supervisor<S: StateStore, P: ProcessBackend> {
    store: S,
    backend: P,
    interpreter: Option<String>,
}

impl<S: StateStore, P: ProcessBackend> fmt::Debug for Supervisor<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("interpreter", &self.interpreter)
            .finish_non_exhaustive()
    }
}

impl<S: StateStore, P: ProcessBackend> Supervisor<S, P> {
    /// Runner files are executed directly unless an interpreter is set.
    pub fn new(store: S, backend: P) -> Self {
        Self {
            store,
            backend,
            interpreter: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: Option<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut P {
        &mut self.backend
    }

    /// Read-through state query.
    pub fn state(&self, runner: &str) -> Result<RunnerState> {
        match self.store.load(runner)? {
            Some(record) if self.backend.is_alive(record.pid) => {
                Ok(RunnerState::Running(record))
            }
            Some(record) => {
                debug!(runner, pid = record.pid, "recorded pid is not alive");
                Ok(RunnerState::Stopped)
            }
            None => Ok(RunnerState::Stopped),
        }
    }

    /// Whether anything is persisted for `runner`, live or not.
    pub fn has_record(&self, runner: &str) -> bool {
        self.store.has_leftovers(runner)
    }

    /// Launch a new run of `runner`.
    ///
    /// Fails with [`GazerError::AlreadyRunning`] and changes nothing when the
    /// recorded process is alive. A stale record is overwritten.
    pub fn start(&mut self, runner: &Runner) -> Result<RunRecord> {
        if let RunnerState::Running(record) = self.state(&runner.name)? {
            return Err(GazerError::AlreadyRunning {
                runner: runner.name.clone(),
                pid: record.pid,
            });
        }

        let request = SpawnRequest {
            runner: runner.name.clone(),
            script: runner.path.clone(),
            interpreter: self.interpreter.clone(),
            log_path: self.store.log_path(&runner.name),
        };
        let pid = match self.backend.spawn(&request) {
            Ok(pid) => pid,
            Err(err) => {
                // The log may already exist; no item may outlive a failed start.
                if let Err(e) = self.store.delete(&runner.name) {
                    warn!(runner = %runner.name, error = %e, "cleanup after failed spawn failed");
                }
                return Err(err);
            }
        };
        let run_id = RunId::generate();

        match self.store.save(&runner.name, pid, &run_id) {
            Ok(record) => {
                info!(runner = %runner.name, pid, run_id = %run_id, "runner started");
                Ok(record)
            }
            Err(err) => {
                // An untracked process could never be stopped again.
                warn!(
                    runner = %runner.name,
                    pid,
                    error = %err,
                    "failed to persist run record; killing the new process"
                );
                if let Err(e) = self.backend.terminate(pid) {
                    warn!(runner = %runner.name, pid, error = %e, "rollback kill failed");
                }
                if let Err(e) = self.store.delete(&runner.name) {
                    warn!(runner = %runner.name, error = %e, "rollback cleanup failed");
                }
                Err(err)
            }
        }
    }

    /// Kill the runner's process group and drop its record.
    ///
    /// Fails with [`GazerError::NotRunning`] when the runner is Stopped; any
    /// leftover (stale or partial) record is still removed in that case.
    pub fn stop(&mut self, runner: &str) -> Result<StopReport> {
        let record = match self.state(runner)? {
            RunnerState::Running(record) => record,
            RunnerState::Stopped => {
                if self.store.has_leftovers(runner) {
                    warn!(runner, "removing leftover state of a runner that is not running");
                    self.store.delete(runner)?;
                }
                return Err(GazerError::NotRunning {
                    runner: runner.to_string(),
                });
            }
        };

        let pgid = match self.backend.terminate(record.pid) {
            Ok(pgid) => {
                debug!(runner, pid = record.pid, pgid, "sent SIGKILL to process group");
                Some(pgid)
            }
            Err(e) => {
                warn!(runner, pid = record.pid, error = %e, "could not kill process group");
                None
            }
        };

        self.store.delete(runner)?;
        info!(runner, pid = record.pid, run_id = %record.run_id, "runner stopped");

        Ok(StopReport {
            pid: record.pid,
            run_id: record.run_id,
            pgid,
        })
    }

    /// Unconditional stop-then-start.
    ///
    /// A runner that was not running is simply started; any other stop
    /// failure aborts the restart.
    pub fn restart(&mut self, runner: &Runner) -> Result<RestartReport> {
        let stopped = match self.stop(&runner.name) {
            Ok(report) => Some(report),
            Err(GazerError::NotRunning { .. }) => {
                info!(runner = %runner.name, "runner was not running; starting it");
                None
            }
            Err(e) => return Err(e),
        };

        let started = self.start(runner)?;
        Ok(RestartReport { stopped, started })
    }
}
