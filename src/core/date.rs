//! 日历日期规范化
//!
//! 服务端和客户端都把日期字段统一成 `YYYY-MM-DD`。

use chrono::{DateTime, NaiveDate, Utc};

const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// 把日期文本解析为日历日期
///
/// 接受 `YYYY-MM-DD` 和 RFC 3339 时间戳（取其 UTC 日期），空串视为缺失。
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, CALENDAR_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).date_naive())
}

pub fn format_calendar_date(date: &NaiveDate) -> String {
    date.format(CALENDAR_FORMAT).to_string()
}

/// 用于 `#[serde(with = ...)]` 的可选日期字段
pub mod optional_calendar_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&super::format_calendar_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => super::calendar_date(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {}", text))),
        }
    }
}
