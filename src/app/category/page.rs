//! 分类页面字段

use super::model::Category;
use crate::views::category::CategoryIndex;
use crate::views::form::{FieldKind, FieldSpec, FormRecord};
use crate::views::page::RecordPage;

impl FormRecord for Category {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("name", "Name", FieldKind::Text)];
}

impl RecordPage for Category {
    const HEADERS: &'static [&'static str] = &["Name"];
    const EMPTY_TEXT: &'static str = "No categories found.";
    const DELETE_QUESTION: &'static str = "Are you sure you want to delete this category?";

    fn cells(&self, _categories: &CategoryIndex) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn details(&self, _categories: &CategoryIndex) -> Vec<(&'static str, String)> {
        vec![("Name", self.name.clone())]
    }
}
