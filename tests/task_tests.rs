use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{as_user, init_db_with_tasks, rtt, setup_test_db, work_one_session};

#[test]
fn test_task_add_and_list() {
    let db_path = setup_test_db("task_add_list");
    init_db_with_tasks(&db_path);

    as_user(
        &db_path,
        "alice",
        &[
            "task", "add", "Onboard intern", "--project", "HR", "--due", "2025-09-30", "--desc",
            "Badge, laptop, accounts",
        ],
    )
    .assert()
    .success()
    .stdout(contains("Task #3 'Onboard intern' created for alice."));

    as_user(&db_path, "alice", &["task", "list", "--mine"])
        .assert()
        .success()
        .stdout(contains("Write report"))
        .stdout(contains("Onboard intern"))
        .stdout(contains("02:00"))
        .stdout(contains("Review budget").not());

    rtt()
        .args(["--db", &db_path, "task", "list", "--assignee", "bob", "-u", "alice"])
        .assert()
        .success()
        .stdout(contains("Review budget"))
        .stdout(contains("Write report").not());

    as_user(&db_path, "alice", &["task", "show", "3"])
        .assert()
        .success()
        .stdout(contains("Project  : HR"))
        .stdout(contains("Due      : 2025-09-30"))
        .stdout(contains("Badge, laptop, accounts"))
        .stdout(contains("No time records."));
}

#[test]
fn test_task_add_rejects_bad_input() {
    let db_path = setup_test_db("task_bad_input");
    init_db_with_tasks(&db_path);

    as_user(&db_path, "alice", &["task", "add", "X", "--due", "30/09/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    as_user(&db_path, "alice", &["task", "add", "   "])
        .assert()
        .failure()
        .stderr(contains("Invalid input: task title cannot be empty"));

    as_user(&db_path, "alice", &["task", "list", "--status", "archived"])
        .assert()
        .failure()
        .stderr(contains("Invalid task status: archived"));

    as_user(&db_path, "alice", &["task", "show", "99"])
        .assert()
        .failure()
        .stderr(contains("Task #99 not found"));
}

#[test]
fn test_task_status_filter_follows_sessions() {
    let db_path = setup_test_db("task_status_filter");
    init_db_with_tasks(&db_path);

    as_user(&db_path, "alice", &["accept", "1", "--at", "2025-09-01 09:00"])
        .assert()
        .success();

    as_user(&db_path, "alice", &["task", "list", "--status", "in_progress"])
        .assert()
        .success()
        .stdout(contains("Write report"))
        .stdout(contains("Review budget").not());

    as_user(&db_path, "alice", &["finish", "--at", "2025-09-01 10:00"])
        .assert()
        .success();

    as_user(&db_path, "alice", &["task", "list", "--status", "done"])
        .assert()
        .success()
        .stdout(contains("Write report"));
}

#[test]
fn test_task_del_removes_records() {
    let db_path = setup_test_db("task_del");
    init_db_with_tasks(&db_path);
    work_one_session(&db_path);

    as_user(&db_path, "alice", &["task", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Task #1 deleted (1 time record(s) removed)."));

    as_user(&db_path, "alice", &["task", "show", "1"])
        .assert()
        .failure()
        .stderr(contains("Task #1 not found"));

    as_user(&db_path, "alice", &["status", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("No sessions"));
}

#[test]
fn test_task_del_can_be_declined() {
    let db_path = setup_test_db("task_del_declined");
    init_db_with_tasks(&db_path);

    as_user(&db_path, "alice", &["task", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Nothing deleted."));

    as_user(&db_path, "alice", &["task", "show", "1"])
        .assert()
        .success();
}

#[test]
fn test_overdue_update_and_stats() {
    let db_path = setup_test_db("task_overdue");
    init_db_with_tasks(&db_path);

    as_user(&db_path, "alice", &["task", "add", "File taxes", "--due", "2025-09-01"])
        .assert()
        .success();
    as_user(&db_path, "bob", &["task", "add", "Renew badge", "--due", "2025-09-05"])
        .assert()
        .success();

    rtt()
        .args(["--db", &db_path, "overdue", "--stats", "--today", "2025-09-10"])
        .assert()
        .success()
        .stdout(contains("pending"))
        .stdout(contains("2 past-due task(s) not yet flagged"));

    rtt()
        .args(["--db", &db_path, "overdue", "--update", "--today", "2025-09-03"])
        .assert()
        .success()
        .stdout(contains("1 task(s) marked overdue."));

    rtt()
        .args(["--db", &db_path, "overdue", "--update", "--stats", "--today", "2025-09-10"])
        .assert()
        .success()
        .stdout(contains("1 task(s) marked overdue."))
        .stdout(contains("Overdue by assignee:"))
        .stdout(contains("alice"))
        .stdout(contains("bob"))
        .stdout(contains("not yet flagged").not());

    // Overdue tasks can still be picked up.
    as_user(&db_path, "alice", &["accept", "3", "--at", "2025-09-10 09:00"])
        .assert()
        .success();
}

#[test]
fn test_duplicate_daily_tasks() {
    let db_path = setup_test_db("task_duplicate_daily");
    init_db_with_tasks(&db_path);

    as_user(&db_path, "alice", &["task", "add", "Standup", "--daily", "--due", "2025-09-01"])
        .assert()
        .success();

    rtt()
        .args(["--db", &db_path, "duplicate-daily", "--date", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("1 daily task(s) created for 2025-09-02: #4"));

    rtt()
        .args(["--db", &db_path, "duplicate-daily", "--date", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("No daily tasks to copy onto 2025-09-02."));

    as_user(&db_path, "alice", &["task", "show", "4"])
        .assert()
        .success()
        .stdout(contains("Standup"))
        .stdout(contains("Due      : 2025-09-02"))
        .stdout(contains("Recurs   : daily"));
}
