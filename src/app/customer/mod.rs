//! 客户管理

mod model;
mod page;

pub use model::Customer;
