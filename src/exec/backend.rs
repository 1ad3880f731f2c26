// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The supervisor talks to a `ProcessBackend` instead of calling into the OS
//! directly, so the lifecycle state machine can be tested without spawning
//! real processes.

use crate::errors::Result;

use super::signal::{self, TerminateError};
use super::spawn::{SpawnRequest, ensure_executable, spawn_detached};

/// OS operations the supervisor needs.
pub trait ProcessBackend {
    /// Whether `pid` currently refers to a live process.
    fn is_alive(&self, pid: u32) -> bool;

    /// Kill the whole process group owning `pid`; returns the group id.
    fn terminate(&mut self, pid: u32) -> std::result::Result<i32, TerminateError>;

    /// Launch a run detached from the caller and return its pid.
    fn spawn(&mut self, request: &SpawnRequest) -> Result<u32>;
}

/// Real backend used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessBackend;

impl ProcessBackend for RealProcessBackend {
    fn is_alive(&self, pid: u32) -> bool {
        signal::is_alive(pid)
    }

    fn terminate(&mut self, pid: u32) -> std::result::Result<i32, TerminateError> {
        signal::terminate(pid)
    }

    fn spawn(&mut self, request: &SpawnRequest) -> Result<u32> {
        ensure_executable(&request.script)?;
        Ok(spawn_detached(request)?)
    }
}
