use std::collections::BTreeSet;
use std::io;

use gazer::errors::{GazerError, Result};
use gazer::exec::{ProcessBackend, SpawnRequest, TerminateError};

/// A fake process backend that:
/// - hands out increasing pids instead of spawning anything
/// - records every spawn request and every terminated pid
/// - treats a pid as alive from spawn until it is terminated or `kill`ed
#[derive(Debug)]
pub struct FakeProcessBackend {
    next_pid: u32,
    alive: BTreeSet<u32>,
    pub spawned: Vec<SpawnRequest>,
    pub terminated: Vec<u32>,
    fail_spawn: bool,
    fail_terminate: bool,
}

impl FakeProcessBackend {
    pub fn new() -> Self {
        Self {
            next_pid: 1000,
            alive: BTreeSet::new(),
            spawned: Vec::new(),
            terminated: Vec::new(),
            fail_spawn: false,
            fail_terminate: false,
        }
    }

    /// Make every following spawn fail.
    pub fn fail_spawns(&mut self) {
        self.fail_spawn = true;
    }

    /// Make every following terminate fail as if signalling were denied,
    /// leaving the process alive.
    pub fn fail_terminates(&mut self) {
        self.fail_terminate = true;
    }

    /// Simulate the process dying outside the supervisor's control.
    pub fn kill(&mut self, pid: u32) {
        self.alive.remove(&pid);
    }

    /// Pretend an unrelated process with this pid exists.
    pub fn mark_alive(&mut self, pid: u32) {
        self.alive.insert(pid);
    }
}

impl Default for FakeProcessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBackend for FakeProcessBackend {
    fn is_alive(&self, pid: u32) -> bool {
        self.alive.contains(&pid)
    }

    fn terminate(&mut self, pid: u32) -> std::result::Result<i32, TerminateError> {
        self.terminated.push(pid);
        if self.fail_terminate {
            return Err(TerminateError::Signal {
                pgid: pid as i32,
                source: io::Error::from_raw_os_error(libc::EPERM),
            });
        }
        if self.alive.remove(&pid) {
            Ok(pid as i32)
        } else {
            Err(TerminateError::NoProcessGroup {
                pid,
                source: io::Error::from_raw_os_error(libc::ESRCH),
            })
        }
    }

    fn spawn(&mut self, request: &SpawnRequest) -> Result<u32> {
        if self.fail_spawn {
            return Err(GazerError::Other(anyhow::anyhow!(
                "spawn of '{}' refused by fake backend",
                request.runner
            )));
        }
        let pid = self.next_pid;
        self.next_pid += 1;
        self.alive.insert(pid);
        self.spawned.push(request.clone());
        Ok(pid)
    }
}
