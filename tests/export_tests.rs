use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{as_user, init_db_with_tasks, rtt, setup_test_db, temp_out, work_one_session};

#[test]
fn test_export_csv_all() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);
    let out = temp_out("export_csv_all", "csv");

    rtt()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    let header = lines.next().expect("header");
    assert!(header.contains("task_title"));
    assert!(header.contains("total_hours"));

    let row = lines.next().expect("one row");
    assert!(row.contains("alice"));
    assert!(row.contains("Write report"));
    assert!(row.contains("finished"));
    assert!(row.contains(",30,90,1.5"));
    assert!(lines.next().is_none());
}

#[test]
fn test_export_json_with_range() {
    let db_path = setup_test_db("export_json_range");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);

    as_user(&db_path, "alice", &["start", "--at", "2025-10-02 08:00"])
        .assert()
        .success();

    let out = temp_out("export_json_range", "json");
    rtt()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2025-09",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["task_title"], "Write report");
    assert_eq!(rows[0]["pause_minutes"], 30);
    assert_eq!(rows[0]["total_hours"], 1.5);

    let out_all = temp_out("export_json_range_all", "json");
    rtt()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out_all, "--range",
            "2025-09-01:2025-10-31",
        ])
        .assert()
        .success();
    let all: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_all).expect("read json")).expect("json");
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_export_rejects_relative_path_and_bad_range() {
    let db_path = setup_test_db("export_rejects");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);

    rtt()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("output file path must be absolute"));

    let out = temp_out("export_rejects", "csv");
    rtt()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2025-09:2025"])
        .assert()
        .failure()
        .stderr(contains("same format"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);
    let out = temp_out("export_empty", "csv");

    rtt()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("No time records found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").expect("seed file");

    rtt()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "old");

    rtt()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("Write report"));
}

#[test]
fn test_backup_compressed_and_log() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_tasks(&db_path);
    let out = temp_out("backup_zip", "sqlite");
    let zip_path = temp_out("backup_zip", "zip");

    rtt()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(std::path::Path::new(&zip_path).exists());
    assert!(!std::path::Path::new(&out).exists());

    rtt()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("task_add"))
        .stdout(contains("backup"));

    rtt()
        .args(["--db", &db_path, "log", "--op", "task_add", "--last", "1"])
        .assert()
        .success()
        .stdout(contains("Review budget"))
        .stdout(contains("Write report").not());
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);

    rtt()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Tasks:"))
        .stdout(contains("Hours logged:"))
        .stdout(contains("1.50"))
        .stdout(contains("Integrity check passed"));
}
