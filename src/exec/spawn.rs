// src/exec/spawn.rs

//! Detached runner launch.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Everything needed to launch one run of a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub runner: String,
    /// The runner definition to execute.
    pub script: PathBuf,
    /// Interpreter to run `script` with; `None` executes it directly.
    pub interpreter: Option<String>,
    /// Receives both stdout and stderr. Truncated on every start.
    pub log_path: PathBuf,
}

/// Make sure the owner may execute `path`, setting mode 0755 if not.
pub fn ensure_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .with_context(|| format!("reading metadata of {:?}", path))?
            .permissions();
        if perms.mode() & 0o100 == 0 {
            perms.set_mode(0o755);
            fs::set_permissions(path, perms)
                .with_context(|| format!("making {:?} executable", path))?;
            debug!(path = %path.display(), "set executable permission");
        }
    }

    #[cfg(not(unix))]
    {
        fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
    }

    Ok(())
}

/// Start the runner as the leader of a new session, with stdout and stderr
/// both redirected to the log file, and return its pid.
///
/// The child is not waited on: it outlives this process and is later
/// reached through its process group.
#[allow(clippy::zombie_processes)]
pub fn spawn_detached(request: &SpawnRequest) -> Result<u32> {
    if let Some(parent) = request.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log dir {:?}", parent))?;
        }
    }

    let log = File::create(&request.log_path)
        .with_context(|| format!("opening log file {:?}", request.log_path))?;
    let log_err = log
        .try_clone()
        .with_context(|| format!("duplicating log handle {:?}", request.log_path))?;

    let mut cmd = match request.interpreter.as_deref() {
        Some(shell) => {
            let mut c = Command::new(shell);
            c.arg(&request.script);
            c
        }
        None => Command::new(&request.script),
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        // SAFETY: setsid is async-signal-safe and touches no memory of the
        // parent; it runs in the forked child before exec.
        unsafe {
            cmd.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            if let Err(rm) = fs::remove_file(&request.log_path) {
                debug!(log = %request.log_path.display(), error = %rm, "could not remove log of failed spawn");
            }
            return Err(anyhow::Error::new(e)
                .context(format!("spawning runner '{}'", request.runner)));
        }
    };
    let pid = child.id();

    info!(
        runner = %request.runner,
        pid,
        script = %request.script.display(),
        log = %request.log_path.display(),
        "runner process started"
    );

    Ok(pid)
}
