use chrono::{Local, TimeZone};
use rtasktracker::core::session::SessionController;
use rtasktracker::core::tasks::{NewTask, TaskLogic};
use rtasktracker::db::initialize::init_db;
use rtasktracker::db::pool::DbPool;
use rtasktracker::db::records;
use rtasktracker::db::sqlite_store::SqliteStore;
use rtasktracker::errors::AppError;
use rtasktracker::models::context::Context;
use std::sync::{Arc, Barrier};
use std::thread;

mod common;
use common::setup_test_db;

const WORKERS: usize = 8;

#[test]
fn test_parallel_accepts_open_a_single_record() {
    let db_path = setup_test_db("concurrent_accept");

    let task_id = {
        let mut pool = DbPool::new(&db_path).expect("open db");
        init_db(&pool.conn).expect("init db");
        TaskLogic::add(
            &mut pool,
            &Context::new("alice"),
            NewTask {
                title: "Write report".into(),
                ..NewTask::default()
            },
        )
        .expect("add task")
        .id
    };

    let start = Local.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap();
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let db_path = db_path.clone();
            thread::spawn(move || {
                // Every worker has its own connection to the same file.
                let mut pool = DbPool::new(&db_path).expect("open db");
                let ctx = Context::new("alice");
                barrier.wait();

                pool.in_transaction(|conn| {
                    SessionController::new(SqliteStore::new(conn)).accept(&ctx, task_id, start)
                })
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(err, AppError::AlreadyActive { task, .. } if *task == task_id),
            "unexpected error: {err}"
        );
    }

    let pool = DbPool::new(&db_path).expect("open db");
    let open = records::load_open_records(&pool.conn, "alice").expect("load records");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].task_id, Some(task_id));
}
