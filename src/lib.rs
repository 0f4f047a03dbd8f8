//! # 库存管理
//!
//! 客户、产品、分类三种资源的增删改查：
//! - `app`：资源模型与路由装配
//! - `core`：错误处理、通用处理器与服务层
//! - `infrastructure`：记录存储（内存 / PostgreSQL）与日志
//! - `client`：资源 API 的 HTTP 客户端
//! - `views`：列表/表单视图与详情视图

pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod views;
