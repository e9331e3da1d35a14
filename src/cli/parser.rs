use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTaskTracker
#[derive(Parser)]
#[command(
    name = "rtasktracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Assign tasks, track work sessions with pauses, and report worked hours using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Employee running the command (default: `default_employee` from the config)
    #[arg(global = true, long = "employee", short = 'u')]
    pub employee: Option<String>,

    /// Act on behalf of another employee
    #[arg(global = true, long = "as", value_name = "EMPLOYEE")]
    pub acting_as: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows for this operation (accept, pause, ...)")]
        operation: Option<String>,

        #[arg(long = "last", help = "Only the newest N rows")]
        last: Option<usize>,
    },

    /// Create, list, show or delete tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Accept a task and start working on it
    Accept {
        /// Task id
        task: i64,

        #[arg(long = "at", help = "Instant to record (YYYY-MM-DD HH:MM or HH:MM); default now")]
        at: Option<String>,
    },

    /// Start a work-day session not tied to a task
    Start {
        #[arg(long = "at", help = "Instant to record (YYYY-MM-DD HH:MM or HH:MM); default now")]
        at: Option<String>,
    },

    /// Pause a working session
    Pause(SessionArgs),

    /// Resume a paused session
    Resume(SessionArgs),

    /// Finish a session and complete its task
    Finish(SessionArgs),

    /// Show today's sessions with elapsed time and progress
    Status {
        #[arg(long = "date", help = "Day to show (YYYY-MM-DD); default today")]
        date: Option<String>,

        #[arg(long = "at", help = "Compute elapsed time at this instant instead of now")]
        at: Option<String>,

        #[arg(long = "watch", help = "Refresh the timers every tick")]
        watch: bool,

        #[arg(long = "count", requires = "watch", help = "Stop watching after N ticks")]
        count: Option<u64>,
    },

    /// Tasks available to pick up and sessions in progress
    Board,

    /// Flag past-due tasks and show overdue statistics
    Overdue {
        #[arg(long = "update", help = "Mark past-due pending/in-progress tasks as overdue")]
        update: bool,

        #[arg(long = "stats", help = "Show task counts per status and overdue per assignee")]
        stats: bool,

        #[arg(long = "today", help = "Reference day (YYYY-MM-DD); default today")]
        today: Option<String>,
    },

    /// Copy yesterday's daily tasks onto a day
    DuplicateDaily {
        #[arg(long = "date", help = "Target day (YYYY-MM-DD); default today")]
        date: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export time records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (start:end)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Record selection shared by pause / resume / finish.
#[derive(clap::Args, Debug, Clone)]
pub struct SessionArgs {
    /// Time record id (default: your only open session)
    pub record: Option<i64>,

    #[arg(long = "task", conflicts_with = "record", help = "Select the open session of this task")]
    pub task: Option<i64>,

    #[arg(long = "at", help = "Instant to record (YYYY-MM-DD HH:MM or HH:MM); default now")]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    Add {
        title: String,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long = "assignee", help = "Employee the task is for (default: yourself)")]
        assignee: Option<String>,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "due", help = "Due date (YYYY-MM-DD)")]
        due: Option<String>,

        #[arg(long = "estimate", help = "Estimated effort in minutes, or 1h30m")]
        estimate: Option<String>,

        #[arg(long = "daily", help = "Recurring task, copied by duplicate-daily")]
        daily: bool,
    },

    /// List tasks
    List {
        #[arg(long = "assignee", help = "Only tasks of this employee")]
        assignee: Option<String>,

        #[arg(long = "mine", conflicts_with = "assignee", help = "Only your tasks")]
        mine: bool,

        #[arg(long = "status", help = "pending, in-progress, completed or overdue")]
        status: Option<String>,
    },

    /// Show one task with its time records
    Show { id: i64 },

    /// Delete a task and its time records
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
