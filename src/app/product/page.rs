//! 产品页面字段

use super::model::Product;
use crate::core::resource::RecordId;
use crate::views::category::CategoryIndex;
use crate::views::form::{FieldKind, FieldSpec, FormRecord};
use crate::views::page::RecordPage;

/// 详情页分类无法解析时的显示
pub const NO_CATEGORY: &str = "No category";

impl FormRecord for Product {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("code", "Code", FieldKind::Text),
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("description", "Description", FieldKind::LongText),
        FieldSpec::required("price", "Price", FieldKind::Decimal),
        FieldSpec::required("category", "Category", FieldKind::Reference),
    ];
}

impl RecordPage for Product {
    const HEADERS: &'static [&'static str] = &["Code", "Name", "Description", "Price", "Category"];
    const EMPTY_TEXT: &'static str = "No products found.";
    const DELETE_QUESTION: &'static str = "Are you sure?";

    fn cells(&self, categories: &CategoryIndex) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.description.clone(),
            self.price.to_string(),
            categories.display_name(&self.category).to_string(),
        ]
    }

    fn details(&self, categories: &CategoryIndex) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Description", self.description.clone()),
            ("Price", format!("{} Baht", self.price)),
            (
                "Category",
                categories
                    .resolve(&self.category)
                    .unwrap_or(NO_CATEGORY)
                    .to_string(),
            ),
        ]
    }

    fn category_ref(&self) -> Option<RecordId> {
        Some(self.category)
    }
}
