//! 客户页面字段

use super::model::Customer;
use crate::core::date::format_calendar_date;
use crate::views::category::CategoryIndex;
use crate::views::form::{FieldKind, FieldSpec, FormRecord};
use crate::views::page::RecordPage;

impl FormRecord for Customer {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("dateOfBirth", "Date of Birth", FieldKind::Date),
        FieldSpec::required("memberNumber", "Member Number", FieldKind::Integer),
        FieldSpec::required("interests", "Interests", FieldKind::Text),
    ];
}

impl RecordPage for Customer {
    const HEADERS: &'static [&'static str] = &["Name", "Date of Birth", "Member #", "Interests"];
    const EMPTY_TEXT: &'static str = "No customers found.";
    const DELETE_QUESTION: &'static str = "Are you sure you want to delete this customer?";

    fn cells(&self, _categories: &CategoryIndex) -> Vec<String> {
        vec![
            self.name.clone(),
            self.date_of_birth
                .as_ref()
                .map(format_calendar_date)
                .unwrap_or_default(),
            self.member_number.to_string(),
            self.interests.clone(),
        ]
    }

    fn details(&self, categories: &CategoryIndex) -> Vec<(&'static str, String)> {
        ["Name", "Date of Birth", "Member Number", "Interests"]
            .into_iter()
            .zip(self.cells(categories))
            .collect()
    }
}
