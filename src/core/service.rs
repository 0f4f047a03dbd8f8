//! 核心服务层模块
//!
//! 把 HTTP 语义映射到记录存储。请求体按整份文档处理：
//! 创建时生成新 id，替换时以路径 id 为准，请求体里自带的 id 一律忽略。

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::error::CoreError;
use super::resource::{RecordId, Resource, ID_FIELD};
use crate::infrastructure::store::RecordStore;

pub struct ResourceService<R: Resource> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<R>, CoreError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn create(&self, body: Value) -> Result<R, CoreError> {
        let record = materialize::<R>(RecordId::generate(), body)?;
        let record = self.store.insert(record).await?;
        debug!(collection = R::COLLECTION, id = %record.id(), "记录已创建");
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<R, CoreError> {
        let id = parse_id::<R>(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(R::not_found_message()))
    }

    /// 整体替换记录，未出现在请求体中的可选字段会被清空
    pub async fn replace(&self, id: &str, body: Value) -> Result<R, CoreError> {
        let id = parse_id::<R>(id)?;
        let record = materialize::<R>(id, body)?;
        self.store
            .replace(record)
            .await?
            .ok_or_else(|| CoreError::NotFound(R::not_found_message()))
    }

    pub async fn delete(&self, id: &str) -> Result<R, CoreError> {
        let id = parse_id::<R>(id)?;
        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(R::not_found_message()))?;
        debug!(collection = R::COLLECTION, %id, "记录已删除");
        Ok(removed)
    }
}

/// 格式不合法的 id 不可能存在，按不存在处理
fn parse_id<R: Resource>(raw: &str) -> Result<RecordId, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::NotFound(R::not_found_message()))
}

/// 用给定 id 把请求体转换成完整记录
fn materialize<R: Resource>(id: RecordId, body: Value) -> Result<R, CoreError> {
    let Value::Object(mut fields) = body else {
        return Err(CoreError::BadRequest(
            "request body must be a JSON object".to_string(),
        ));
    };
    fields.remove("id");
    fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| CoreError::BadRequest(format!("invalid {}: {}", R::COLLECTION, e)))
}
