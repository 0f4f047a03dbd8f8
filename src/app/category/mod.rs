//! 产品分类

mod model;
mod page;

pub use model::Category;
