use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there,
/// so it has to exist before anything else runs.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Base schema: tasks and time records.
fn create_base_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            title            TEXT NOT NULL,
            description      TEXT NOT NULL DEFAULT '',
            assignee         TEXT NOT NULL,
            project          TEXT,
            due_date         TEXT,
            estimate_minutes INTEGER,
            daily            INTEGER NOT NULL DEFAULT 0,
            status           TEXT NOT NULL DEFAULT 'pending'
                             CHECK(status IN ('pending','in-progress','completed','overdue')),
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_assignee_status ON tasks(assignee, status);
        CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date);

        CREATE TABLE IF NOT EXISTS time_records (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee       TEXT NOT NULL,
            task_id        INTEGER REFERENCES tasks(id),
            date           TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'not-started'
                           CHECK(status IN ('not-started','working','paused','finished')),
            start_time     TEXT,
            pause_duration INTEGER NOT NULL DEFAULT 0,
            end_time       TEXT,
            total_hours    REAL,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_employee_date ON time_records(employee, date);
        "#,
    )?;
    Ok(())
}

/// Open pauses are stored so a later process can resume them.
fn add_pause_started_at(conn: &Connection) -> Result<()> {
    let has_column = {
        let mut stmt = conn.prepare("PRAGMA table_info('time_records')")?;
        let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
        let mut found = false;
        for c in cols {
            if c? == "pause_started_at" {
                found = true;
            }
        }
        found
    };

    if !has_column {
        conn.execute_batch("ALTER TABLE time_records ADD COLUMN pause_started_at TEXT;")?;
    }
    Ok(())
}

fn add_open_session_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_records_open
            ON time_records(employee, task_id, status);
        CREATE INDEX IF NOT EXISTS idx_records_task ON time_records(task_id);
        "#,
    )?;
    Ok(())
}

type MigrationFn = fn(&Connection) -> Result<()>;

/// Ordered list of schema migrations: (version, description, step).
const MIGRATIONS: [(&str, &str, MigrationFn); 3] = [
    (
        "20251001_0001_create_tasks_and_time_records",
        "Created tasks and time_records tables",
        create_base_tables,
    ),
    (
        "20251008_0002_add_pause_started_at",
        "Added pause_started_at to time_records",
        add_pause_started_at,
    ),
    (
        "20251015_0003_add_open_session_index",
        "Indexed open sessions by employee and task",
        add_open_session_index,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the log table, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Each step runs in its own transaction together with its log marker, so a
/// failed step leaves neither a half-applied schema nor a false marker.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, description, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let outcome = step(conn).and_then(|_| {
            conn.execute(
                "INSERT INTO log (date, operation, target, message)
                 VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
                [version, description],
            )
        });

        match outcome {
            Ok(_) => {
                conn.execute_batch("COMMIT;")?;
                success(format!("Migration applied: {} → {}", version, description));
                applied += 1;
            }
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }
    }

    Ok(applied)
}
