// src/state/file.rs

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::run_id::RunId;
use crate::state::{RunRecord, StateStore};

/// File-backed store.
///
/// Layout, per runner `R`, inside the state directory:
///
/// ```text
/// R.pid   textual process id
/// R.bid   run id, e.g. "Q 7 K 2 M"
/// R.log   combined stdout/stderr of the latest run
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn pid_path(&self, runner: &str) -> PathBuf {
        self.dir.join(format!("{runner}.pid"))
    }

    pub fn run_id_path(&self, runner: &str) -> PathBuf {
        self.dir.join(format!("{runner}.bid"))
    }

    fn items(&self, runner: &str) -> [PathBuf; 3] {
        [
            self.pid_path(runner),
            self.run_id_path(runner),
            self.log_path(runner),
        ]
    }
}

/// Read a small text item; a missing file is `None`.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so an
/// undecodable item reaches the parser and is treated as malformed.
fn read_item(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("reading state file {:?}", path))
            .into()),
    }
}

fn parse_pid(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|pid| *pid > 0)
}

impl StateStore for FileStateStore {
    fn log_path(&self, runner: &str) -> PathBuf {
        self.dir.join(format!("{runner}.log"))
    }

    fn load(&self, runner: &str) -> Result<Option<RunRecord>> {
        let Some(raw_pid) = read_item(&self.pid_path(runner))? else {
            return Ok(None);
        };
        let Some(pid) = parse_pid(&raw_pid) else {
            warn!(runner, raw = %raw_pid, "malformed pid record; treating as not running");
            return Ok(None);
        };

        let run_id = match read_item(&self.run_id_path(runner))? {
            Some(raw) => match raw.parse::<RunId>() {
                Ok(id) => id,
                Err(e) => {
                    warn!(runner, error = %e, "malformed run id record; treating as not running");
                    return Ok(None);
                }
            },
            None => {
                warn!(runner, pid, "pid recorded without run id; treating as not running");
                return Ok(None);
            }
        };

        Ok(Some(RunRecord {
            pid,
            run_id,
            log_path: self.log_path(runner),
        }))
    }

    fn save(&self, runner: &str, pid: u32, run_id: &RunId) -> Result<RunRecord> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating state dir {:?}", self.dir))?;

        let pid_path = self.pid_path(runner);
        fs::write(&pid_path, pid.to_string())
            .with_context(|| format!("writing {:?}", pid_path))?;

        let run_id_path = self.run_id_path(runner);
        fs::write(&run_id_path, run_id.to_string())
            .with_context(|| format!("writing {:?}", run_id_path))?;

        let log_path = self.log_path(runner);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("creating {:?}", log_path))?;

        debug!(runner, pid, run_id = %run_id, "saved run record");
        Ok(RunRecord {
            pid,
            run_id: run_id.clone(),
            log_path,
        })
    }

    fn delete(&self, runner: &str) -> Result<()> {
        for path in self.items(runner) {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed state file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("removing state file {:?}", path))
                        .into());
                }
            }
        }
        Ok(())
    }

    fn has_leftovers(&self, runner: &str) -> bool {
        self.items(runner).iter().any(|p| p.exists())
    }
}
