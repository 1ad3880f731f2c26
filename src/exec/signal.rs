// src/exec/signal.rs

//! Liveness probing and process-group termination.

use std::io;

use thiserror::Error;

/// Why a process group could not be killed.
///
/// None of these are fatal to a stop: in every case the process is either
/// already gone or must not be touched, and cleanup of the record continues.
#[derive(Debug, Error)]
pub enum TerminateError {
    #[error("invalid pid {0}")]
    InvalidPid(u32),

    #[error("no process with pid {pid}: {source}")]
    NoProcessGroup { pid: u32, source: io::Error },

    #[error("refusing to signal protected process group {pgid}")]
    ProtectedGroup { pgid: i32 },

    #[error("failed to kill process group {pgid}: {source}")]
    Signal { pgid: i32, source: io::Error },

    #[error("process groups are not supported on this platform")]
    Unsupported,
}

/// Convert a recorded pid into something safe to hand to `kill(2)`.
///
/// Zero and negative values address whole groups (or every process), so they
/// are never produced.
fn to_raw_pid(pid: u32) -> Option<i32> {
    i32::try_from(pid).ok().filter(|p| *p > 0)
}

/// True iff a no-op signal can be delivered to `pid`.
///
/// Permission errors are not distinguished from a missing process.
#[cfg(unix)]
pub fn is_alive(pid: u32) -> bool {
    let Some(raw) = to_raw_pid(pid) else {
        return false;
    };
    // SAFETY: signal 0 performs only the existence/permission check and
    // delivers nothing.
    unsafe { libc::kill(raw, 0) == 0 }
}

#[cfg(not(unix))]
pub fn is_alive(_pid: u32) -> bool {
    false
}

/// Send SIGKILL to the whole process group that owns `pid`.
///
/// Returns the group id that was signalled. Does not wait for the processes
/// to exit.
#[cfg(unix)]
pub fn terminate(pid: u32) -> Result<i32, TerminateError> {
    let raw = to_raw_pid(pid).ok_or(TerminateError::InvalidPid(pid))?;

    // SAFETY: plain integer syscalls; errno is read immediately afterwards.
    let pgid = unsafe { libc::getpgid(raw) };
    if pgid < 0 {
        return Err(TerminateError::NoProcessGroup {
            pid,
            source: io::Error::last_os_error(),
        });
    }

    // Never signal our own group (or init's).
    // SAFETY: getpgrp has no preconditions.
    let own = unsafe { libc::getpgrp() };
    if pgid <= 1 || pgid == own {
        return Err(TerminateError::ProtectedGroup { pgid });
    }

    // SAFETY: as above.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        return Err(TerminateError::Signal {
            pgid,
            source: io::Error::last_os_error(),
        });
    }

    Ok(pgid)
}

#[cfg(not(unix))]
pub fn terminate(_pid: u32) -> Result<i32, TerminateError> {
    Err(TerminateError::Unsupported)
}
