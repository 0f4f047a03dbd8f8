//! 浏览器侧资源客户端

pub mod api;
pub mod error;

pub use api::{HttpResourceClient, ResourceApi};
pub use error::ClientError;
