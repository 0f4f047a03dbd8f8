//! 资源抽象：记录标识与资源类型约束

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// 记录主键，由存储层在创建时生成，之后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 线上格式中记录主键所在的字段名
pub const ID_FIELD: &str = "_id";

/// 一种可通过 `/api/<collection>` 进行增删改查的资源类型
///
/// 记录在线上以 JSON 对象表示，主键位于 `_id` 字段。
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// 集合名，同时也是 URL 路径段
    const COLLECTION: &'static str;
    /// 面向用户的单数名称，用于提示信息
    const LABEL: &'static str;
    /// 需要规范化为日历日期的字段
    const DATE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> RecordId;

    fn not_found_message() -> String {
        format!("{} not found", Self::LABEL)
    }

    fn deleted_message() -> String {
        format!("{} deleted successfully", Self::LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse_and_display() {
        let id = RecordId::generate();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        assert!("not-an-id".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let id = RecordId::generate();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
