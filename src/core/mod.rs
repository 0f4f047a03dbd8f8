//! 核心层：错误、响应、中间件与通用资源处理

pub mod date;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod number;
pub mod resource;
pub mod response;
pub mod service;

pub use error::CoreError;
pub use resource::{RecordId, Resource};
pub use service::ResourceService;
