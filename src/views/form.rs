//! 表单绑定
//!
//! 表单是字段名到文本的映射。未编辑时为空模板，编辑时由被编辑记录派生。

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::core::date::{calendar_date, format_calendar_date};
use crate::core::resource::{RecordId, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Integer,
    Decimal,
    /// 指向另一集合的 id
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 线上字段名
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }
}

/// 可以通过表单创建和编辑的资源
pub trait FormRecord: Resource {
    const FIELDS: &'static [FieldSpec];
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} is not a valid date")]
    InvalidDate(&'static str),
    #[error("{0} must be selected from the list")]
    InvalidReference(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: &'static [FieldSpec],
    values: BTreeMap<&'static str, String>,
}

impl FormState {
    /// 对应字段集的空模板
    pub fn empty<R: FormRecord>() -> Self {
        Self {
            fields: R::FIELDS,
            values: R::FIELDS.iter().map(|f| (f.name, String::new())).collect(),
        }
    }

    /// 用已有记录预填表单
    pub fn bind<R: FormRecord>(record: &R) -> Self {
        let mut form = Self::empty::<R>();
        if let Ok(Value::Object(doc)) = serde_json::to_value(record) {
            for field in R::FIELDS {
                let text = match doc.get(field.name) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                form.values.insert(field.name, text);
            }
        }
        form
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// 未知字段返回 `false`
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter().find(|f| f.name == name) {
            Some(field) => {
                self.values.insert(field.name, value.into());
                true
            }
            None => false,
        }
    }

    /// 未填写的必填字段标签
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required && self.value(f.name).trim().is_empty())
            .map(|f| f.label)
            .collect()
    }

    /// 转换成请求体，不含 id
    pub fn to_body(&self) -> Result<Value, FormError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }

        let mut body = Map::new();
        for field in self.fields {
            let raw = self.value(field.name).trim();
            let value = if raw.is_empty() {
                match field.kind {
                    FieldKind::Text | FieldKind::LongText => Value::String(String::new()),
                    _ => Value::Null,
                }
            } else {
                convert(field, raw)?
            };
            body.insert(field.name.to_string(), value);
        }
        Ok(Value::Object(body))
    }
}

fn convert(field: &FieldSpec, raw: &str) -> Result<Value, FormError> {
    match field.kind {
        FieldKind::Text | FieldKind::LongText => Ok(Value::String(raw.to_string())),
        FieldKind::Date => calendar_date(raw)
            .map(|d| Value::String(format_calendar_date(&d)))
            .ok_or(FormError::InvalidDate(field.label)),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| FormError::NotANumber(field.label)),
        FieldKind::Decimal => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(FormError::NotANumber(field.label)),
        FieldKind::Reference => raw
            .parse::<RecordId>()
            .map(|id| Value::String(id.to_string()))
            .map_err(|_| FormError::InvalidReference(field.label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::category::Category;
    use crate::app::customer::Customer;
    use crate::app::product::Product;
    use chrono::NaiveDate;
    use serde_json::json;

    fn customer() -> Customer {
        Customer {
            id: RecordId::generate(),
            name: "Ann".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            member_number: 7,
            interests: "chess".to_string(),
        }
    }

    #[test]
    fn test_empty_template_matches_field_set() {
        let form = FormState::empty::<Customer>();
        for field in Customer::FIELDS {
            assert_eq!(form.value(field.name), "");
        }
        assert_eq!(form.missing_required().len(), Customer::FIELDS.len());
    }

    #[test]
    fn test_bind_then_body_round_trip() {
        let record = customer();
        let form = FormState::bind(&record);
        assert_eq!(form.value("dateOfBirth"), "1990-01-01");
        assert_eq!(form.value("memberNumber"), "7");

        let body = form.to_body().unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Ann",
                "dateOfBirth": "1990-01-01",
                "memberNumber": 7,
                "interests": "chess"
            })
        );
    }

    #[test]
    fn test_forms_compare_by_field_set_and_values() {
        let mut form = FormState::bind(&customer());
        assert_ne!(form, FormState::empty::<Customer>());

        for field in Customer::FIELDS {
            form.set(field.name, "");
        }
        assert_eq!(form, FormState::empty::<Customer>());
        assert_ne!(FormState::empty::<Customer>(), FormState::empty::<Category>());
    }

    #[test]
    fn test_missing_required_blocks_body() {
        let mut form = FormState::empty::<Customer>();
        form.set("name", "Ann");
        let err = form.to_body().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingRequired(vec!["Date of Birth", "Member Number", "Interests"])
        );
    }

    #[test]
    fn test_number_and_reference_parsing() {
        let mut form = FormState::empty::<Product>();
        form.set("code", "P-1");
        form.set("name", "Tea");
        form.set("description", "Green tea");
        form.set("price", "ten");
        form.set("category", "drinks");
        assert_eq!(form.to_body(), Err(FormError::NotANumber("Price")));

        form.set("price", "10.5");
        assert_eq!(form.to_body(), Err(FormError::InvalidReference("Category")));

        let category = RecordId::generate();
        form.set("category", category.to_string());
        let body = form.to_body().unwrap();
        assert_eq!(body["price"], json!(10.5));
        assert_eq!(body["category"], json!(category.to_string()));
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut form = FormState::empty::<Customer>();
        assert!(!form.set("email", "ann@example.com"));
        assert!(form.set("interests", "go"));
    }
}
