#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tf() -> Command {
    cargo_bin_cmd!("timeflow")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timeflow.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique widget preferences path inside the system temp dir
pub fn setup_test_prefs(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timeflow_widgets.json", name));
    let prefs_path = path.to_string_lossy().to_string();
    fs::remove_file(&prefs_path).ok();
    prefs_path
}

/// Initialize DB + prefs for a test and return both paths
pub fn init_store(name: &str) -> (String, String) {
    let db = setup_test_db(name);
    let prefs = setup_test_prefs(name);

    tf().args(["--db", &db, "--prefs", &prefs, "--test", "init"])
        .assert()
        .success();

    (db, prefs)
}

/// Add a TimeFlow via the CLI
pub fn add_item(db: &str, prefs: &str, title: &str, from: &str, to: &str) {
    tf().args([
        "--db", db, "--prefs", prefs, "add", title, "--from", from, "--to", to,
    ])
    .assert()
    .success();
}

/// Capture stdout of a successful invocation as a String
pub fn stdout_of(args: &[&str]) -> String {
    let out = tf().args(args).output().expect("command failed to start");
    assert!(out.status.success(), "command failed: {:?}", args);
    String::from_utf8_lossy(&out.stdout).to_string()
}
