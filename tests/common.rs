#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rhl() -> Command {
    cargo_bin_cmd!("rhoslogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhoslogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema on a fresh DB
pub fn init_db(db_path: &str) {
    rhl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Record a status change at a fixed timestamp via the CLI
pub fn change_at(db_path: &str, driver: &str, status: &str, at: &str) {
    rhl()
        .args(["--db", db_path, "--test", "change", driver, status, "--at", at])
        .assert()
        .success();
}

/// Initialize DB and add a small day of duty changes useful for many tests
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    change_at(db_path, "D001", "ON", "2025-06-02 06:00:00");
    change_at(db_path, "D001", "D", "2025-06-02 06:30:00");
    change_at(db_path, "D001", "OFF", "2025-06-02 14:30:00");
}
