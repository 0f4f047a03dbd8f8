//! 资源客户端
//!
//! 访问 `{api_base}/{collection}`，所有非 2xx 响应都转换为 [`ClientError`]，不做重试。

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::warn;

use super::error::ClientError;
use crate::core::date::{calendar_date, format_calendar_date};
use crate::core::resource::{RecordId, Resource};
use crate::core::response::DeleteResponse;

/// 视图依赖的资源 API
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ClientError>;

    async fn create(&self, body: &Value) -> Result<R, ClientError>;

    async fn get(&self, id: RecordId) -> Result<R, ClientError>;

    async fn replace(&self, id: RecordId, body: &Value) -> Result<R, ClientError>;

    async fn delete(&self, id: RecordId) -> Result<DeleteResponse, ClientError>;
}

pub struct HttpResourceClient<R> {
    http: reqwest::Client,
    base_url: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> HttpResourceClient<R> {
    pub fn new(api_base: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    /// 多个资源共用一个连接池
    pub fn with_client(http: reqwest::Client, api_base: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/{}", api_base.trim_end_matches('/'), R::COLLECTION),
            _record: PhantomData,
        }
    }

    fn item_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for HttpResourceClient<R> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        let resp = check(self.http.get(&self.base_url).send().await?).await?;
        let docs: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        docs.into_iter().map(decode::<R>).collect()
    }

    async fn create(&self, body: &Value) -> Result<R, ClientError> {
        let resp = self.http.post(&self.base_url).json(body).send().await?;
        read_record(check(resp).await?).await
    }

    async fn get(&self, id: RecordId) -> Result<R, ClientError> {
        let resp = self.http.get(self.item_url(id)).send().await?;
        read_record(check(resp).await?).await
    }

    async fn replace(&self, id: RecordId, body: &Value) -> Result<R, ClientError> {
        let resp = self.http.put(self.item_url(id)).json(body).send().await?;
        read_record(check(resp).await?).await
    }

    async fn delete(&self, id: RecordId) -> Result<DeleteResponse, ClientError> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        check(resp)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(body));
    }
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or(body);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn read_record<R: Resource>(resp: Response) -> Result<R, ClientError> {
    let doc: Value = resp
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    decode(doc)
}

/// 规范化日期字段后解码记录
pub fn decode<R: Resource>(mut doc: Value) -> Result<R, ClientError> {
    normalize_dates::<R>(&mut doc);
    serde_json::from_value(doc).map_err(|e| ClientError::Decode(e.to_string()))
}

/// 日期字段统一为 `YYYY-MM-DD`，无法解析的置空
pub fn normalize_dates<R: Resource>(doc: &mut Value) {
    let Some(fields) = doc.as_object_mut() else {
        return;
    };
    for name in R::DATE_FIELDS {
        let Some(slot) = fields.get_mut(*name) else {
            continue;
        };
        let normalized = match slot.as_str() {
            Some(raw) => match calendar_date(raw) {
                Some(date) => Value::String(format_calendar_date(&date)),
                None => {
                    if !raw.trim().is_empty() {
                        warn!(collection = R::COLLECTION, field = *name, raw, "无法解析的日期");
                    }
                    Value::Null
                }
            },
            None => Value::Null,
        };
        *slot = normalized;
    }
}
