// tests/discovery.rs

mod common;
use crate::common::{TestResult, init_tracing, write_runner};

use std::fs;

use tempfile::TempDir;

use gazer::discovery::{discover_runners, select_runner};
use gazer::errors::GazerError;
use gazer::fs::RealFileSystem;

#[test]
fn real_directory_is_filtered_and_sorted() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    write_runner(dir.path(), "zeta.gzr", "true");
    write_runner(dir.path(), "alpha.gzr", "true");
    write_runner(dir.path(), "alpha.gzr.bak", "true");
    write_runner(dir.path(), "readme.md", "true");
    fs::create_dir(dir.path().join("nested.gzr"))?;

    let runners = discover_runners(&RealFileSystem, dir.path(), ".gzr")?;

    let names: Vec<&str> = runners.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert_eq!(runners[0].path, dir.path().join("alpha.gzr"));
    assert_eq!(runners[0].file_name(), "alpha.gzr");
    Ok(())
}

#[test]
fn custom_suffix_is_honoured() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    write_runner(dir.path(), "svc.run", "true");
    write_runner(dir.path(), "demo.gzr", "true");

    let runners = discover_runners(&RealFileSystem, dir.path(), ".run")?;
    assert_eq!(select_runner(&runners, None, ".run")?.name, "svc");
    Ok(())
}

#[test]
fn empty_directory_has_nothing_to_select() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let runners = discover_runners(&RealFileSystem, dir.path(), ".gzr")?;
    assert!(runners.is_empty());
    assert!(matches!(
        select_runner(&runners, None, ".gzr"),
        Err(GazerError::NoRunners { suffix }) if suffix == ".gzr"
    ));
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("nope");

    assert!(matches!(
        discover_runners(&RealFileSystem, &gone, ".gzr"),
        Err(GazerError::Other(_))
    ));
}
