// tests/state_store.rs

mod common;
use crate::common::{TestResult, init_tracing};

use std::fs;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use gazer::run_id::RunId;
use gazer::state::{FileStateStore, StateStore};

fn store() -> (TempDir, FileStateStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path().join("state"));
    (dir, store)
}

#[test]
fn empty_store_has_no_record() -> TestResult {
    init_tracing();
    let (_dir, store) = store();

    assert!(store.load("demo")?.is_none());
    assert!(!store.has_leftovers("demo"));
    Ok(())
}

#[test]
fn save_writes_three_items_in_textual_form() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    let id: RunId = "Q7K2M".parse()?;

    let record = store.save("demo", 4242, &id)?;

    assert_eq!(fs::read_to_string(store.pid_path("demo"))?, "4242");
    assert_eq!(fs::read_to_string(store.run_id_path("demo"))?, "Q 7 K 2 M");
    assert!(record.log_path.is_file());
    assert_eq!(record.log_path, store.log_path("demo"));
    Ok(())
}

#[test]
fn delete_removes_everything_and_tolerates_missing_items() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("demo", 17, &"AAAAA".parse()?)?;
    fs::remove_file(store.log_path("demo"))?;

    store.delete("demo")?;
    assert!(!store.has_leftovers("demo"));
    assert!(store.load("demo")?.is_none());

    store.delete("demo")?;
    store.delete("never-started")?;
    Ok(())
}

#[test]
fn runners_do_not_collide() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("api", 10, &"AAAAA".parse()?)?;
    store.save("web", 20, &"BBBBB".parse()?)?;

    store.delete("api")?;

    assert!(store.load("api")?.is_none());
    let web = store.load("web")?.expect("web record must survive");
    assert_eq!(web.pid, 20);
    Ok(())
}

#[test]
fn malformed_pid_is_treated_as_no_record() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("demo", 99, &"ABCDE".parse()?)?;

    for junk in ["", "not-a-pid", "-3", "0", "12 34"] {
        fs::write(store.pid_path("demo"), junk)?;
        assert!(store.load("demo")?.is_none(), "pid {junk:?} must not load");
        assert!(store.has_leftovers("demo"));
    }
    Ok(())
}

#[test]
fn partial_record_is_treated_as_no_record() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("demo", 99, &"ABCDE".parse()?)?;

    fs::remove_file(store.run_id_path("demo"))?;
    assert!(store.load("demo")?.is_none());
    assert!(store.has_leftovers("demo"));

    fs::write(store.run_id_path("demo"), "abc")?;
    assert!(store.load("demo")?.is_none());
    Ok(())
}

#[test]
fn undecodable_items_are_treated_as_no_record() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("demo", 99, &"ABCDE".parse()?)?;

    fs::write(store.pid_path("demo"), [0xff, 0xfe, 0x31])?;
    assert!(store.load("demo")?.is_none());
    assert!(store.has_leftovers("demo"));

    store.save("demo", 99, &"ABCDE".parse()?)?;
    fs::write(store.run_id_path("demo"), [0xc3, 0x28, b' ', b'A'])?;
    assert!(store.load("demo")?.is_none());

    store.delete("demo")?;
    assert!(!store.has_leftovers("demo"));
    Ok(())
}

#[test]
fn pid_with_trailing_newline_loads() -> TestResult {
    init_tracing();
    let (_dir, store) = store();
    store.save("demo", 5, &"ABCDE".parse()?)?;
    fs::write(store.pid_path("demo"), "5\n")?;

    assert_eq!(store.load("demo")?.map(|r| r.pid), Some(5));
    Ok(())
}

proptest! {
    #[test]
    fn load_returns_what_save_wrote(pid in 1u32..=i32::MAX as u32, seed in any::<u64>()) {
        let (_dir, store) = store();
        let run_id = RunId::generate_with(&mut StdRng::seed_from_u64(seed));

        let saved = store.save("demo", pid, &run_id).unwrap();
        let loaded = store.load("demo").unwrap();

        prop_assert_eq!(loaded, Some(saved));
    }
}
