#![allow(dead_code)]

use std::error::Error;
use std::path::{Path, PathBuf};

use gazer::discovery::Runner;
use gazer::exec::RealProcessBackend;
use gazer::state::FileStateStore;
use gazer::supervisor::Supervisor;
use tempfile::TempDir;

pub use gazer_test_utils::init_tracing;
pub use gazer_test_utils::process::{is_gone, wait_for_exit, wait_until, write_runner};

pub type TestResult = Result<(), Box<dyn Error>>;

/// A temporary working directory with its own state directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("creating temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join(".gazer")
    }

    /// Write `<name>.gzr` and return it as a runner.
    pub fn runner(&self, name: &str, body: &str) -> Runner {
        let path = write_runner(self.path(), &format!("{name}.gzr"), body);
        Runner::new(name, path)
    }

    /// Supervisor over this workspace's state dir, running scripts with `sh`.
    pub fn supervisor(&self) -> Supervisor<FileStateStore, RealProcessBackend> {
        Supervisor::new(FileStateStore::new(self.state_dir()), RealProcessBackend)
            .with_interpreter(Some("sh".to_string()))
    }
}
