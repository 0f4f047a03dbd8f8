//! 产品管理

mod model;
pub mod page;

pub use model::Product;
