//! 视图层：列表/表单视图、详情视图及其渲染

pub mod category;
pub mod detail;
pub mod form;
pub mod interaction;
pub mod list;
pub mod page;
pub mod scope;

pub use detail::{DetailState, DetailView};
pub use interaction::Interaction;
pub use list::{ListMsg, ListView};

/// 视图操作后的页面跳转
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// 跳到某集合的列表页
    List(&'static str),
}
