//! ---
//! pg_section: "15-testing-qa"
//! pg_subsection: "integration-tests"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Multi-run and concurrent-run behaviour against one store."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use primegen_common::config::{AppConfig, GeneratorConfig, StoreConfig};
use primegen_core::{generate_window, GeneratorError, RunPipeline};
use primegen_persistence::{PersistenceError, PrimeStore};
use tempfile::tempdir;

fn config(path: std::path::PathBuf, step_size: u64) -> AppConfig {
    AppConfig {
        store: StoreConfig {
            path,
            sync: false,
            ..StoreConfig::default()
        },
        generator: GeneratorConfig { step_size },
        ..AppConfig::default()
    }
}

#[test]
fn many_runs_match_a_single_scan() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("primes.txt");
    let pipeline = RunPipeline::new(&config(path.clone(), 500))?;

    let mut checkpoints = Vec::new();
    for _ in 0..8 {
        let report = pipeline.run()?;
        checkpoints.push(report.checkpoint());
    }
    assert!(checkpoints.windows(2).all(|pair| pair[0] < pair[1]));

    let stored = PrimeStore::at(&path).load()?;
    let last = *stored.last().unwrap();
    let oracle: Vec<u64> = generate_window(&[], last - 1)?;
    assert_eq!(stored, oracle);
    Ok(())
}

#[cfg(unix)]
#[test]
fn rerun_after_failed_append_rediscovers_same_primes() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let data = dir.path().join("data");
    let target = data.join("primes.txt");
    let link = dir.path().join("primes.txt");
    // A dangling link loads as an absent store, but appending through it
    // fails until the target directory exists.
    std::os::unix::fs::symlink(&target, &link)?;
    let pipeline = RunPipeline::new(&config(link.clone(), 50))?;

    match pipeline.run() {
        Err(GeneratorError::Store(PersistenceError::Write { path, .. })) => assert_eq!(path, link),
        other => panic!("expected a write failure, got {other:?}"),
    }
    assert!(!target.exists());
    assert!(PrimeStore::at(&link).load()?.is_empty());

    fs::create_dir(&data)?;
    let report = pipeline.run()?;
    assert_eq!(report.previous_count, 0);
    assert_eq!(report.window.start(), 2);
    assert_eq!(report.new_primes, generate_window(&[], 50)?);
    assert_eq!(PrimeStore::at(&target).load()?, report.new_primes);
    Ok(())
}

#[test]
fn run_after_torn_write_resumes_from_loaded_tail() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("primes.txt");
    // An interrupted append left "10" without its newline.
    fs::write(&path, "2\n3\n5\n7\n10")?;
    let pipeline = RunPipeline::new(&config(path.clone(), 10))?;

    let report = pipeline.run()?;
    assert_eq!(report.previous_largest, Some(10));
    assert_eq!(report.window.start(), 11);
    assert_eq!(report.new_primes, vec![11, 13, 17, 19]);
    assert_eq!(fs::read_to_string(&path)?, "2\n3\n5\n7\n10\n11\n13\n17\n19\n");

    let next = pipeline.run()?;
    assert_eq!(next.previous_count, 9);
    assert_eq!(next.window.start(), 20);
    Ok(())
}

#[test]
fn concurrent_runs_never_corrupt_the_store() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("primes.txt");
    let workers = 4;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let barrier = barrier.clone();
            let config = config(path.clone(), 2_000);
            thread::spawn(move || {
                let pipeline = RunPipeline::new(&config)?;
                barrier.wait();
                pipeline.run().map(|_| ())
            })
        })
        .collect();

    let mut completed = 0;
    for handle in handles {
        match handle.join().expect("worker panicked") {
            Ok(()) => completed += 1,
            Err(GeneratorError::Store(PersistenceError::Locked { .. })) => {}
            Err(other) => return Err(other.into()),
        }
    }
    assert!(completed >= 1);

    // Strict ordering is validated on load; duplicates would fail here.
    let stored = PrimeStore::at(&path).load()?;
    let last = *stored.last().unwrap();
    assert_eq!(stored, generate_window(&[], last - 1)?);
    Ok(())
}
