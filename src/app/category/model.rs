//! 分类数据模型

use serde::{Deserialize, Serialize};

use crate::core::resource::{RecordId, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
}

impl Resource for Category {
    const COLLECTION: &'static str = "category";
    const LABEL: &'static str = "Category";

    fn id(&self) -> RecordId {
        self.id
    }
}
