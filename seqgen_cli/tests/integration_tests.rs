//! Integration tests for the seqgen binary.
//!
//! These tests verify end-to-end behavior including:
//! - Default generation and argument handling
//! - Text and CSV output to stdout and files
//! - Batch input documents
//! - Parameter validation

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from the user's config and data
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("seqgen"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-summing sequence generator"));
}

#[test]
fn test_default_command_prints_fibonacci() {
    let home = setup_test_dir();
    cli(&home)
        .assert()
        .success()
        .stdout("(2, 10) : [0, 1, 1, 2, 3, 5, 8, 13, 21, 34]\n");
}

#[test]
fn test_generate_range() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "-m", "4", "-l", "5"])
        .assert()
        .success()
        .stdout("(2, 5) : [0, 1, 1, 2, 3]\n(3, 5) : [0, 1, 2, 3, 6]\n(4, 5) : [0, 1, 2, 3, 5]\n");
}

#[test]
fn test_top_level_flags_generate() {
    let home = setup_test_dir();
    cli(&home)
        .args(["-m", "4", "-l", "5"])
        .assert()
        .success()
        .stdout("(2, 5) : [0, 1, 1, 2, 3]\n(3, 5) : [0, 1, 2, 3, 6]\n(4, 5) : [0, 1, 2, 3, 5]\n");
}

#[test]
fn test_top_level_verbose_with_flags() {
    let home = setup_test_dir();
    cli(&home)
        .args(["-v", "-m", "3", "-l", "4", "-f", "csv"])
        .assert()
        .success()
        .stdout("initial,length,S0,S1,S2,S3\n2,4,0,1,1,2\n3,4,0,1,2,3\n")
        .stderr(predicate::str::contains("starting with 2 numbers"));
}

#[test]
fn test_long_sequence_has_all_terms() {
    let home = setup_test_dir();
    let output = cli(&home)
        .args(["-l", "200"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let terms = stdout
        .trim_end()
        .trim_start_matches("(2, 200) : [")
        .trim_end_matches(']')
        .split(", ")
        .collect::<Vec<_>>();
    assert_eq!(terms.len(), 200);
    // F(199)
    assert_eq!(terms[199], "173402521172797813159685037284371942044301");
}

#[test]
fn test_length_below_order_keeps_seed() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--max-number", "4", "--length", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(4, 3) : [0, 1, 2, 3]"));
}

#[test]
fn test_csv_to_stdout() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "-m", "3", "-l", "6", "-f", "csv"])
        .assert()
        .success()
        .stdout("initial,length,S0,S1,S2,S3,S4,S5\n2,6,0,1,1,2,3,5\n3,6,0,1,2,3,6,11\n");
}

#[test]
fn test_csv_to_file() {
    let home = setup_test_dir();
    let out = home.path().join("out").join("seq.csv");

    cli(&home)
        .args(["generate", "-m", "5", "-l", "8", "-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 sequences"));

    let contents = fs::read_to_string(&out).expect("Failed to read CSV");
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    assert_eq!(reader.records().count(), 4);
    assert!(contents.starts_with("initial,length,S0"));
}

#[test]
fn test_text_to_file() {
    let home = setup_test_dir();
    let out = home.path().join("seq.txt");

    cli(&home)
        .args(["generate", "-m", "3", "-l", "4", "-o"])
        .arg(&out)
        .assert()
        .success();

    let contents = fs::read_to_string(&out).unwrap();
    assert_eq!(contents, "(2, 4) : [0, 1, 1, 2]\n(3, 4) : [0, 1, 2, 3]\n");
}

#[test]
fn test_csv_with_mixed_lengths_fails() {
    let home = setup_test_dir();
    let out = home.path().join("seq.csv");

    cli(&home)
        .args(["generate", "-m", "4", "-l", "3", "-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("HeterogeneousLength"));

    assert!(!out.exists());
}

#[test]
fn test_toml_input_document() {
    let home = setup_test_dir();
    let input = home.path().join("input.toml");
    fs::write(&input, "init_list = [3, 2, 3]\nlength = 6\n").unwrap();

    cli(&home)
        .args(["generate", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("(2, 6) : [0, 1, 1, 2, 3, 5]\n(3, 6) : [0, 1, 2, 3, 6, 11]\n");
}

#[test]
fn test_json_input_document() {
    let home = setup_test_dir();
    let input = home.path().join("input.json");
    let doc = serde_json::json!({ "init_list": [4], "length": 7 });
    fs::write(&input, doc.to_string()).unwrap();

    cli(&home)
        .args(["generate", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("(4, 7) : [0, 1, 2, 3, 6, 12, 23]\n");
}

#[test]
fn test_yaml_input_document() {
    let home = setup_test_dir();
    let input = home.path().join("seq_input.yml");
    fs::write(&input, "init_list: [2, 3]\nlength: 5\n").unwrap();

    cli(&home)
        .args(["--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("(2, 5) : [0, 1, 1, 2, 3]\n(3, 5) : [0, 1, 2, 3, 6]\n");
}

#[test]
fn test_input_with_zero_initial_rejected() {
    let home = setup_test_dir();
    let input = home.path().join("input.toml");
    fs::write(&input, "init_list = [2, 0]\nlength = 6\n").unwrap();

    cli(&home)
        .args(["generate", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("must be at least 1"));
}

#[test]
fn test_input_conflicts_with_range_flags() {
    let home = setup_test_dir();
    let input = home.path().join("input.toml");
    fs::write(&input, "init_list = [2]\nlength = 6\n").unwrap();

    cli(&home)
        .args(["generate", "-m", "3", "--input"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_negative_length_rejected() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "-l", "-1"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_format_rejected() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "-f", "hdf5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn test_verbose_reports_progress() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "-v", "-m", "3", "-l", "4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("starting with 3 numbers"));
}

#[test]
fn test_config_defaults_applied() {
    let home = setup_test_dir();
    let config = home.path().join("seqgen.toml");
    fs::write(
        &config,
        "[defaults]\nmax_number = 3\nlength = 4\n\n[output]\nformat = \"csv\"\n",
    )
    .unwrap();

    cli(&home)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("initial,length,S0,S1,S2,S3\n2,4,0,1,1,2\n3,4,0,1,2,3\n");
}

#[test]
fn test_config_command_writes_file() {
    let home = setup_test_dir();

    cli(&home)
        .args(["config", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("store_group = \"sequences\""));

    assert!(home.path().join("config/seqgen/config.toml").exists());
}
