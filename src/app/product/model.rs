//! 产品数据模型

use serde::{Deserialize, Serialize};

use crate::core::number;
use crate::core::resource::{RecordId, Resource};

/// 产品
///
/// `category` 只是分类 id，写入时不校验分类是否存在，读取方必须容忍悬空引用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "number::decimal")]
    pub price: f64,
    pub category: RecordId,
}

impl Resource for Product {
    const COLLECTION: &'static str = "product";
    const LABEL: &'static str = "Product";

    fn id(&self) -> RecordId {
        self.id
    }
}
