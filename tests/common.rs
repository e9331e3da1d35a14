#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtt() -> Command {
    cargo_bin_cmd!("rtasktracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtasktracker.sqlite", name));
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

/// Run a command as `employee` against `db_path`.
pub fn as_user(db_path: &str, employee: &str, args: &[&str]) -> Command {
    let mut cmd = rtt();
    cmd.args(["--db", db_path, "-u", employee]).args(args);
    cmd
}

/// Fresh DB with one task for alice (#1) and one for bob (#2).
pub fn init_db_with_tasks(db_path: &str) {
    rtt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    as_user(db_path, "alice", &["task", "add", "Write report", "--estimate", "2h"])
        .assert()
        .success();

    as_user(db_path, "alice", &["task", "add", "Review budget", "--assignee", "bob"])
        .assert()
        .success();
}

/// alice works on task #1: 09:00 accept, 09:30 pause, 10:00 resume, 11:00 finish.
pub fn work_one_session(db_path: &str) {
    for args in [
        ["accept", "1", "--at", "2025-09-01 09:00"].as_slice(),
        ["pause", "--at", "2025-09-01 09:30"].as_slice(),
        ["resume", "--at", "2025-09-01 10:00"].as_slice(),
        ["finish", "--at", "2025-09-01 11:00"].as_slice(),
    ] {
        as_user(db_path, "alice", args).assert().success();
    }
}
