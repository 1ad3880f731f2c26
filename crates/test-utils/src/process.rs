//! Helpers for tests that spawn real runner scripts.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Write a runner script named `<name><suffix>` into `dir`.
///
/// The file is left non-executable on purpose; starting it must fix that.
pub fn write_runner(dir: &Path, file_name: &str, body: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("writing runner script");
    path
}

/// Poll `cond` every 20ms until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(20));
    }
}

/// Reap `pid` if it is our own child, so a killed child does not linger as
/// a zombie that still answers `kill(pid, 0)`.
pub fn reap(pid: u32) {
    let mut status = 0;
    // SAFETY: WNOHANG never blocks; a pid that is not our child just yields
    // ECHILD.
    unsafe {
        libc::waitpid(pid as libc::pid_t, &mut status, libc::WNOHANG);
    }
}

/// True when `pid` is gone or only a zombie.
pub fn is_gone(pid: u32) -> bool {
    reap(pid);
    if !gazer::exec::is_alive(pid) {
        return true;
    }
    // Orphans of a killed group may wait on a non-reaping init.
    fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| {
            let after_comm = stat.rsplit_once(')')?.1.trim_start().to_string();
            after_comm.chars().next()
        })
        .is_some_and(|state| state == 'Z' || state == 'X')
}

/// Wait up to five seconds for `pid` to disappear.
pub fn wait_for_exit(pid: u32) -> bool {
    wait_until(Duration::from_secs(5), || is_gone(pid))
}
