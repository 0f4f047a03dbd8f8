//! 数值字段的宽松解析
//!
//! 表单提交的数值往往是字符串，这里同时接受 JSON 数字和可解析为数字的字符串。

use serde::{de::Error, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// 用于 `#[serde(deserialize_with = ...)]` 的整数字段
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Integer(n) => Ok(n),
        Numeric::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Numeric::Float(f) => Err(D::Error::custom(format!("expected an integer, got {}", f))),
        Numeric::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", text))),
    }
}

/// 用于 `#[serde(deserialize_with = ...)]` 的小数字段
pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Numeric::deserialize(deserializer)? {
        Numeric::Integer(n) => n as f64,
        Numeric::Float(f) => f,
        Numeric::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", text)))?,
    };
    if !value.is_finite() {
        return Err(D::Error::custom("expected a finite number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "integer")]
        count: i64,
        #[serde(deserialize_with = "decimal")]
        price: f64,
    }

    fn row(value: serde_json::Value) -> Result<Row, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_numbers_and_numeric_text_are_accepted() {
        let parsed = row(json!({ "count": "7", "price": " 10.5 " })).unwrap();
        assert_eq!(parsed.count, 7);
        assert_eq!(parsed.price, 10.5);

        let parsed = row(json!({ "count": 8, "price": 10 })).unwrap();
        assert_eq!(parsed.count, 8);
        assert_eq!(parsed.price, 10.0);

        assert_eq!(row(json!({ "count": 9.0, "price": 1 })).unwrap().count, 9);
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        assert!(row(json!({ "count": "seven", "price": 1 })).is_err());
        assert!(row(json!({ "count": 7.5, "price": 1 })).is_err());
        assert!(row(json!({ "count": 7, "price": "ten" })).is_err());
        assert!(row(json!({ "count": 7, "price": "NaN" })).is_err());
        assert!(row(json!({ "count": 7, "price": true })).is_err());
    }
}
