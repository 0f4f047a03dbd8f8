//! 客户数据模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date::optional_calendar_date;
use crate::core::number;
use crate::core::resource::{RecordId, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, with = "optional_calendar_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "number::integer")]
    pub member_number: i64,
    pub interests: String,
}

impl Resource for Customer {
    const COLLECTION: &'static str = "customer";
    const LABEL: &'static str = "Customer";
    const DATE_FIELDS: &'static [&'static str] = &["dateOfBirth"];

    fn id(&self) -> RecordId {
        self.id
    }
}
