pub mod initialize;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod records;
pub mod repository;
pub mod sqlite_store;
pub mod stats;
pub mod tasks;
