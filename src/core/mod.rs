pub mod backup;
pub mod calculator;
pub mod config;
pub mod log;
pub mod session;
pub mod status;
pub mod tasks;
