//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid task status: {0}")]
    InvalidTaskStatus(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid record status: {0}")]
    InvalidRecordStatus(String),

    // ---------------------------
    // Session / task logic
    // ---------------------------
    #[error("Cannot {action} a session that is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Task #{0} not found")]
    TaskNotFound(i64),

    #[error("Time record #{0} not found")]
    RecordNotFound(i64),

    #[error("No open session found for {0}")]
    NoOpenSession(String),

    #[error("Several open sessions for {employee}: {ids}. Pass a record id or --task")]
    AmbiguousSession { employee: String, ids: String },

    #[error("Task #{task} already has an open session (record #{record})")]
    AlreadyActive { task: i64, record: i64 },

    #[error("{0} already has an open session (record #{1}); finish it first")]
    SessionInProgress(String, i64),

    #[error("Task #{0} is not assigned to {1}")]
    NotAssigned(i64, String),

    #[error("Task #{0} is {1} and cannot be accepted")]
    TaskNotAvailable(i64, String),

    #[error("No employee selected: pass --employee or set default_employee in the config")]
    NoEmployee,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
