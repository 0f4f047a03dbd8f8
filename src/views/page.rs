//! 页面渲染：列表表格、表单面板、详情

use std::fmt::Write;

use super::category::CategoryIndex;
use super::form::{FieldKind, FormRecord, FormState};
use crate::core::resource::RecordId;

/// 有列表页和详情页的资源
pub trait RecordPage: FormRecord {
    const HEADERS: &'static [&'static str];
    /// 列表为空时的提示行
    const EMPTY_TEXT: &'static str;
    const DELETE_QUESTION: &'static str;

    fn cells(&self, categories: &CategoryIndex) -> Vec<String>;

    fn details(&self, categories: &CategoryIndex) -> Vec<(&'static str, String)>;

    /// 详情页需要解析的分类
    fn category_ref(&self) -> Option<RecordId> {
        None
    }
}

/// 渲染列表，第一列是记录 id 以便在操作中引用
pub fn render_table<R: RecordPage>(items: &[R], categories: &CategoryIndex) -> String {
    let mut headers = vec!["ID"];
    headers.extend_from_slice(R::HEADERS);

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut row = vec![item.id().to_string()];
            row.extend(item.cells(categories));
            row
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);

    if rows.is_empty() {
        out.push_str(R::EMPTY_TEXT);
        out.push('\n');
    }
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

/// 渲染表单面板；引用字段附带可选项
pub fn render_form<R: RecordPage>(
    form: &FormState,
    editing: bool,
    categories: &CategoryIndex,
) -> String {
    let mut out = String::new();
    let title = if editing { "Edit" } else { "Add" };
    let _ = writeln!(out, "[{} {}]", title, R::LABEL);

    for field in form.fields() {
        let marker = if field.required { "*" } else { "" };
        let value = form.value(field.name);
        match field.kind {
            FieldKind::Reference => {
                let shown = value
                    .parse::<RecordId>()
                    .ok()
                    .and_then(|id| categories.resolve(&id))
                    .unwrap_or(value);
                let _ = writeln!(out, "  {}{} ({}): {}", field.label, marker, field.name, shown);
                for (id, name) in categories.options() {
                    let _ = writeln!(out, "      - {} {}", id, name);
                }
            }
            _ => {
                let _ = writeln!(out, "  {}{} ({}): {}", field.label, marker, field.name, value);
            }
        }
    }

    let submit = if editing { "Update" } else { "Add" };
    if editing {
        let _ = writeln!(out, "  <{}> <Cancel>", submit);
    } else {
        let _ = writeln!(out, "  <{}>", submit);
    }
    out
}

pub fn render_details<R: RecordPage>(record: &R, categories: &CategoryIndex) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Details", R::LABEL);
    for (label, value) in record.details(categories) {
        let _ = writeln!(out, "  {}: {}", label, value);
    }
    out
}
