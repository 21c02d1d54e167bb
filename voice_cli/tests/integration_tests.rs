//! Integration tests for the vox binary.
//!
//! These tests verify end-to-end behavior including:
//! - Catalog listing and exercise details
//! - Routine file validation
//! - Running a routine to completion with fast ticks
//! - Config file initialisation

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vox"))
}

/// Two short exercises: 2 x 1s with 1s rest, then 1 x 2s
fn write_short_routine(dir: &Path) -> PathBuf {
    let path = dir.join("routine.toml");
    fs::write(
        &path,
        r#"
[[exercise]]
id = 1
name = "Quick Hum"
benefit = "Warm-up"
total_duration = 2
repetition_count = 2
repetition_duration = 1
rest_duration = 1
break_after = 1

[[exercise]]
id = 2
name = "Quick Siren"
benefit = "Range"
total_duration = 2
repetition_count = 1
repetition_duration = 2
"#,
    )
    .expect("Failed to write routine");
    path
}

/// Config path inside the temp dir so tests never touch the real one
fn config_arg(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guided vocal warm-up routine timer"));
}

#[test]
fn test_list_builtin_routine() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("list")
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Jaw & Neck Relaxation"))
        .stdout(predicate::str::contains("Silent Stretch & Breath"))
        .stdout(predicate::str::contains("9 exercises"));
}

#[test]
fn test_list_json() {
    let temp_dir = setup_test_dir();

    let output = cli()
        .arg("list")
        .arg("--json")
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .output()
        .expect("Failed to run vox");
    assert!(output.status.success());

    let exercises: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("list --json should print JSON");
    let exercises = exercises.as_array().expect("expected an array");
    assert_eq!(exercises.len(), 9);
    assert_eq!(exercises[2]["repetition_count"], 6);
}

#[test]
fn test_list_custom_catalog() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("list")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Hum"))
        .stdout(predicate::str::contains("2 exercises"));
}

#[test]
fn test_show_exercise() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("show")
        .arg("4")
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Humming"))
        .stdout(predicate::str::contains("Activates chest resonance"))
        .stdout(predicate::str::contains("Break after: 15s"));
}

#[test]
fn test_show_out_of_range_fails() {
    let temp_dir = setup_test_dir();

    for position in ["0", "10"] {
        cli()
            .arg("show")
            .arg(position)
            .arg("--config")
            .arg(config_arg(temp_dir.path()))
            .assert()
            .failure();
    }
}

#[test]
fn test_validate_good_file() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("validate")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_reports_problems() {
    let temp_dir = setup_test_dir();
    let path = temp_dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
[[exercise]]
id = 1
name = "Zero Reps"
benefit = ""
total_duration = 0
repetition_count = 0
repetition_duration = 0
"#,
    )
    .unwrap();

    cli()
        .arg("validate")
        .arg(&path)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("repetition_count must be at least 1"))
        .stderr(predicate::str::contains("repetition_duration must be positive"));
}

#[test]
fn test_run_to_completion() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("run")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .arg("--auto-start")
        .arg("--tick-millis")
        .arg("1")
        .arg("--no-cues")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest 1s"))
        .stdout(predicate::str::contains("Rep 2/2 of Quick Hum"))
        .stdout(predicate::str::contains("Exercise 2/2: Quick Siren"))
        .stdout(predicate::str::contains("Routine complete"));
}

#[test]
fn test_run_from_last_exercise() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("run")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .arg("--from")
        .arg("2")
        .arg("--auto-start")
        .arg("--tick-millis")
        .arg("1")
        .arg("--no-cues")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise 2/2: Quick Siren"))
        .stdout(predicate::str::contains("Quick Hum").not())
        .stdout(predicate::str::contains("Routine complete"));
}

#[test]
fn test_run_without_start_stops_on_eof() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("run")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .arg("--no-cues")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped at exercise 1/2"))
        .stdout(predicate::str::contains("Routine complete").not());
}

#[test]
fn test_run_quit_command() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("run")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .arg("--no-cues")
        .write_stdin("n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped at exercise 2/2"));
}

#[test]
fn test_run_rejects_bad_start_position() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());

    cli()
        .arg("run")
        .arg("--catalog")
        .arg(&routine)
        .arg("--config")
        .arg(config_arg(temp_dir.path()))
        .arg("--from")
        .arg("3")
        .assert()
        .failure();
}

#[test]
fn test_config_init_and_print() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("vox").join("config.toml");

    cli()
        .arg("config")
        .arg("--init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    assert!(config_path.exists());

    cli()
        .arg("config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tick_millis = 1000"));
}

#[test]
fn test_config_tick_and_catalog_are_used() {
    let temp_dir = setup_test_dir();
    let routine = write_short_routine(temp_dir.path());
    let config_path = config_arg(temp_dir.path());
    fs::write(
        &config_path,
        format!(
            "[timer]\ntick_millis = 1\n\n[cues]\nenabled = false\n\n[catalog]\npath = {:?}\n",
            routine.to_string_lossy()
        ),
    )
    .unwrap();

    cli()
        .arg("run")
        .arg("--config")
        .arg(&config_path)
        .arg("--auto-start")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Siren"))
        .stdout(predicate::str::contains("Routine complete"));
}
