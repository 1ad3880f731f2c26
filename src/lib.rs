// src/lib.rs

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod menu;
pub mod run_id;
pub mod state;
pub mod supervisor;

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::cli::{Action, CliArgs, Invocation};
use crate::config::{GazerConfig, load_or_default};
use crate::discovery::{Runner, discover_runners, select_runner};
use crate::errors::{GazerError, Result};
use crate::exec::{ProcessBackend, RealProcessBackend};
use crate::fs::RealFileSystem;
use crate::state::{FileStateStore, StateStore};
use crate::supervisor::{RunnerState, Supervisor};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (+ `--state-dir` override)
/// - runner discovery in the current directory
/// - the supervisor over the file store and real processes
/// - inline or interactive front end
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.no_banner {
        menu::print_banner(&mut out)?;
    }

    let invocation = Invocation::from_positionals(&args.args)?;

    let mut config = load_or_default(&args.config)?;
    if let Some(dir) = args.state_dir {
        config = config.with_state_dir(dir);
    }
    debug!(?config, ?invocation, "resolved invocation");

    let runners = discover_runners(&RealFileSystem, Path::new("."), &config.suffix)?;
    if runners.is_empty() {
        return Err(GazerError::NoRunners {
            suffix: config.suffix.clone(),
        });
    }

    let mut supervisor = build_supervisor(&config);

    match invocation {
        Invocation::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_interactive(&mut supervisor, &runners, &mut input, &mut out)
        }
        Invocation::Inline { runner, action } => {
            let runner = select_runner(&runners, runner.as_deref(), &config.suffix)?;
            execute(&mut supervisor, runner, action, &mut out)
        }
    }
}

/// Supervisor over the configured state directory and real OS processes.
pub fn build_supervisor(config: &GazerConfig) -> Supervisor<FileStateStore, RealProcessBackend> {
    Supervisor::new(FileStateStore::new(&config.state_dir), RealProcessBackend)
        .with_interpreter(config.interpreter().map(str::to_string))
}

/// Perform one lifecycle action and report it on `out`.
pub fn execute<S, P, W>(
    supervisor: &mut Supervisor<S, P>,
    runner: &Runner,
    action: Action,
    out: &mut W,
) -> Result<()>
where
    S: StateStore,
    P: ProcessBackend,
    W: Write,
{
    match action {
        Action::Start => {
            supervisor.start(runner)?;
            writeln!(out, "Success")?;
        }
        Action::Stop => {
            supervisor.stop(&runner.name)?;
            writeln!(out, "Success")?;
        }
        Action::Restart => {
            supervisor.restart(runner)?;
            writeln!(out, "Success")?;
        }
        Action::Status => match supervisor.state(&runner.name)? {
            RunnerState::Running(record) => writeln!(
                out,
                "{}: running (pid {}, run {})",
                runner.name, record.pid, record.run_id
            )?,
            RunnerState::Stopped => writeln!(out, "{}: stopped", runner.name)?,
        },
    }
    Ok(())
}

/// Menu-driven flow: pick a runner, show its run id, pick an action.
pub fn run_interactive<S, P, R, W>(
    supervisor: &mut Supervisor<S, P>,
    runners: &[Runner],
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: StateStore,
    P: ProcessBackend,
    R: BufRead,
    W: Write,
{
    let Some(runner) = menu::choose_runner(runners, input, out)? else {
        return Ok(());
    };

    let has_record = supervisor.has_record(&runner.name);
    let run_id = supervisor.store().load(&runner.name)?.map(|r| r.run_id);

    let Some(action) = menu::choose_action(runner, has_record, run_id.as_ref(), input, out)? else {
        return Ok(());
    };

    execute(supervisor, runner, action, out)
}
