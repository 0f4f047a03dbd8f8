//! 基础设施层：存储与日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{RecordStore, StoreError};
