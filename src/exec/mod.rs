// src/exec/mod.rs

//! Process layer: liveness checks, process-group termination and detached
//! spawning of runner scripts.
//!
//! - [`signal`] answers "is this pid alive?" and kills whole process groups.
//! - [`spawn`] launches a runner in its own session with output captured to
//!   its log file.
//! - [`backend`] provides the `ProcessBackend` trait and a concrete
//!   `RealProcessBackend` that the supervisor uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod signal;
pub mod spawn;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use signal::{TerminateError, is_alive, terminate};
pub use spawn::{SpawnRequest, ensure_executable, spawn_detached};
