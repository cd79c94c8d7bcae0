//! ---
//! pg_section: "05-external-interfaces"
//! pg_subsection: "integration-tests"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "End-to-end tests driving the primegen binary."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

fn primegen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("primegen").unwrap();
    cmd.current_dir(dir)
        .env_remove("PRIMEGEN_CONFIG")
        .env("PRIMEGEN_LOG", "warn");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn fresh_run_creates_store_in_working_directory() {
    let dir = tempdir().unwrap();
    let stdout = stdout_of(primegen(dir.path()).args(["--step-size", "10"]));

    assert!(stdout.contains("Found 5 new primes."));
    assert!(stdout.contains("Largest new prime = 11"));
    assert!(stdout.contains("Prime generation complete in"));
    assert_eq!(
        fs::read_to_string(dir.path().join("primes.txt")).unwrap(),
        "2\n3\n5\n7\n11\n"
    );
}

#[test]
fn successive_runs_resume_and_status_reports() {
    let dir = tempdir().unwrap();
    primegen(dir.path())
        .args(["run", "--step-size", "10"])
        .assert()
        .success();
    let stdout = stdout_of(primegen(dir.path()).args(["run", "--step-size", "10"]));
    assert!(stdout.contains("Found 3 new primes."));
    assert!(stdout.contains("Largest new prime = 19"));

    let status = stdout_of(primegen(dir.path()).arg("status"));
    assert!(status.contains("8 primes stored in primes.txt. Largest = 19"));
}

#[test]
fn json_report_is_machine_readable() {
    let dir = tempdir().unwrap();
    let stdout = stdout_of(primegen(dir.path()).args(["--step-size", "20", "--json"]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["previous_count"], 0);
    assert_eq!(report["window"]["start"], 2);
    assert_eq!(report["window"]["end"], 21);
    assert_eq!(
        report["new_primes"],
        serde_json::json!([2, 3, 5, 7, 11, 13, 17, 19])
    );
    assert!(report["elapsed_seconds"].is_number());
}

#[test]
fn config_file_sets_store_and_step() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("primegen.toml"),
        "[store]\npath = \"data/found.txt\"\n\n[generator]\nstep_size = 5\n\n[metrics]\ntextfile = \"metrics/primegen.prom\"\n",
    )
    .unwrap();

    let stdout = stdout_of(&mut primegen(dir.path()));
    assert!(stdout.contains("Largest new prime = 5"));
    assert_eq!(
        fs::read_to_string(dir.path().join("data/found.txt")).unwrap(),
        "2\n3\n5\n"
    );
    let metrics = fs::read_to_string(dir.path().join("metrics/primegen.prom")).unwrap();
    assert!(metrics.contains("primegen_primes_found_total 3"));
    assert!(metrics.contains("primegen_candidates_scanned_total 5"));
    assert!(metrics.contains("primegen_last_run_success 1"));
}

#[test]
fn unreadable_store_fails_the_run() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("primes.txt")).unwrap();
    primegen(dir.path())
        .args(["--step-size", "10"])
        .assert()
        .failure();
}

#[test]
fn out_of_order_store_fails_without_appending() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("primes.txt"), "2\n5\n3\n").unwrap();
    primegen(dir.path())
        .args(["--step-size", "10"])
        .assert()
        .failure();
    assert_eq!(
        fs::read_to_string(dir.path().join("primes.txt")).unwrap(),
        "2\n5\n3\n"
    );
}

#[test]
fn failed_run_still_exports_metrics() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("primegen.toml"),
        "[generator]\nstep_size = 10\n\n[metrics]\ntextfile = \"primegen.prom\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("primes.txt"), "2\n5\n3\n").unwrap();

    primegen(dir.path()).assert().failure();
    let metrics = fs::read_to_string(dir.path().join("primegen.prom")).unwrap();
    assert!(metrics.contains("primegen_last_run_success 0"));
    assert!(metrics.contains("primegen_run_failures_total 1"));
}

#[test]
fn zero_step_size_is_rejected() {
    let dir = tempdir().unwrap();
    primegen(dir.path())
        .args(["--step-size", "0"])
        .assert()
        .failure();
    assert!(!dir.path().join("primes.txt").exists());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    primegen(dir.path())
        .args(["--config", "absent.toml"])
        .assert()
        .failure();
}
