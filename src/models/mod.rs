pub mod context;
pub mod record_status;
pub mod task;
pub mod task_status;
pub mod time_record;
