// tests/interactive_menu.rs

mod common;
use crate::common::{TestResult, init_tracing};

use std::io::Cursor;

use gazer::cli::Action;
use gazer::discovery::Runner;
use gazer::errors::GazerError;
use gazer::supervisor::{RunnerState, Supervisor};
use gazer::{execute, run_interactive};
use gazer_test_utils::{FakeProcessBackend, MemoryStateStore};

fn runners() -> Vec<Runner> {
    vec![Runner::new("api", "./api.gzr"), Runner::new("web", "./web.gzr")]
}

fn drive(
    sup: &mut Supervisor<MemoryStateStore, FakeProcessBackend>,
    answers: &str,
) -> (gazer::errors::Result<()>, String) {
    let mut out = Vec::new();
    let result = run_interactive(sup, &runners(), &mut Cursor::new(answers.to_string()), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn menu_starts_the_chosen_runner() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());

    let (result, out) = drive(&mut sup, "2\n1\n");
    result?;

    assert!(out.contains("Actions for 'web':"));
    assert!(out.contains("1) Start"));
    assert!(out.trim_end().ends_with("Success"));
    assert!(sup.state("web")?.is_running());
    assert_eq!(sup.state("api")?, RunnerState::Stopped);
    Ok(())
}

#[test]
fn menu_shows_run_id_and_stops_running_runner() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());
    let record = sup.start(&runners()[0])?;

    let (result, out) = drive(&mut sup, "1\n2\n");
    result?;

    assert!(out.contains(&format!("> {} <", record.run_id)));
    assert!(out.contains("2) Stop"));
    assert_eq!(sup.state("api")?, RunnerState::Stopped);
    assert_eq!(sup.backend().terminated, vec![record.pid]);
    Ok(())
}

#[test]
fn menu_restart_replaces_running_instance() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());
    let first = sup.start(&runners()[1])?;

    let (result, _) = drive(&mut sup, "2\n1\n");
    result?;

    match sup.state("web")? {
        RunnerState::Running(record) => assert_ne!(record.pid, first.pid),
        RunnerState::Stopped => panic!("web should be running after restart"),
    }
    Ok(())
}

#[test]
fn menu_stop_of_dead_runner_cleans_up_and_fails() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());
    let record = sup.start(&runners()[0])?;
    sup.backend_mut().kill(record.pid);

    let (result, out) = drive(&mut sup, "1\n2\n");

    assert!(out.contains("2) Stop"), "a leftover record still offers Stop");
    assert!(matches!(result, Err(GazerError::NotRunning { .. })));
    assert!(!sup.has_record("api"));
    Ok(())
}

#[test]
fn quitting_changes_nothing() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());

    let (result, _) = drive(&mut sup, "1\n\n");
    result?;

    assert!(sup.backend().spawned.is_empty());
    Ok(())
}

#[test]
fn status_action_reports_state() -> TestResult {
    init_tracing();
    let mut sup = Supervisor::new(MemoryStateStore::new(), FakeProcessBackend::new());
    let list = runners();
    let api = &list[0];

    let mut out = Vec::new();
    execute(&mut sup, api, Action::Status, &mut out)?;
    assert_eq!(String::from_utf8(out)?, "api: stopped\n");

    let record = sup.start(api)?;
    let mut out = Vec::new();
    execute(&mut sup, api, Action::Status, &mut out)?;
    assert_eq!(
        String::from_utf8(out)?,
        format!("api: running (pid {}, run {})\n", record.pid, record.run_id)
    );
    Ok(())
}
