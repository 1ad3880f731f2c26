use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use gazer::errors::Result;
use gazer::run_id::RunId;
use gazer::state::{RunRecord, StateStore};

/// Which items of a record are present; lets tests build partial states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredItems {
    pub pid: Option<u32>,
    pub run_id: Option<RunId>,
    pub log: bool,
}

/// In-memory `StateStore` for supervisor tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    items: Mutex<HashMap<String, StoredItems>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite whatever is stored for `runner`.
    pub fn put(&self, runner: &str, items: StoredItems) {
        self.items.lock().unwrap().insert(runner.to_string(), items);
    }

    pub fn get(&self, runner: &str) -> Option<StoredItems> {
        self.items.lock().unwrap().get(runner).cloned()
    }
}

impl StateStore for MemoryStateStore {
    fn log_path(&self, runner: &str) -> PathBuf {
        PathBuf::from(format!("/memory/{runner}.log"))
    }

    fn load(&self, runner: &str) -> Result<Option<RunRecord>> {
        let items = self.items.lock().unwrap();
        Ok(items.get(runner).and_then(|s| {
            Some(RunRecord {
                pid: s.pid?,
                run_id: s.run_id.clone()?,
                log_path: self.log_path(runner),
            })
        }))
    }

    fn save(&self, runner: &str, pid: u32, run_id: &RunId) -> Result<RunRecord> {
        self.put(
            runner,
            StoredItems {
                pid: Some(pid),
                run_id: Some(run_id.clone()),
                log: true,
            },
        );
        Ok(RunRecord {
            pid,
            run_id: run_id.clone(),
            log_path: self.log_path(runner),
        })
    }

    fn delete(&self, runner: &str) -> Result<()> {
        self.items.lock().unwrap().remove(runner);
        Ok(())
    }

    fn has_leftovers(&self, runner: &str) -> bool {
        self.items
            .lock()
            .unwrap()
            .get(runner)
            .is_some_and(|s| s.pid.is_some() || s.run_id.is_some() || s.log)
    }
}
