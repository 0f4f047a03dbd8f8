//! 分类名称解析

use crate::app::category::Category;
use crate::core::resource::RecordId;

/// 产品行显示的未知分类占位
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// 挂载时加载一次的分类列表
///
/// 按 id 线性查找。引用可能悬空，查不到时返回 `None`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn resolve(&self, id: &RecordId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == *id)
            .map(|c| c.name.as_str())
    }

    pub fn display_name(&self, id: &RecordId) -> &str {
        self.resolve(id).unwrap_or(UNKNOWN_CATEGORY)
    }

    /// 下拉框选项 (id, 名称)
    pub fn options(&self) -> impl Iterator<Item = (RecordId, &str)> {
        self.categories.iter().map(|c| (c.id, c.name.as_str()))
    }
}
