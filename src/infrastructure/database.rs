//! 数据库基础设施
//!
//! 每种资源一张表，记录以 JSONB 文档形式保存。

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    types::Json,
};
use tracing::info;

use super::store::{RecordStore, StoreError};
use crate::config::DatabaseConfig;
use crate::core::resource::{RecordId, Resource};

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!("连接数据库: {}", mask_password(&config.url));

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    /// 打开某资源的集合，表不存在时创建
    pub async fn collection<R: Resource>(&self) -> Result<PgStore<R>, StoreError> {
        let store = PgStore::new(self.pool.clone());
        store.ensure_table().await?;
        Ok(store)
    }
}

fn mask_password(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

pub struct PgStore<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Resource> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    fn table() -> String {
        format!("\"{}\"", R::COLLECTION)
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (id UUID PRIMARY KEY, doc JSONB NOT NULL)",
            Self::table()
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    fn decode(doc: serde_json::Value) -> Result<R, StoreError> {
        serde_json::from_value(doc).map_err(|e| StoreError::Corrupted(e.to_string()))
    }

    fn encode(record: &R) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(record).map_err(|e| StoreError::Corrupted(e.to_string()))
    }
}

#[async_trait]
impl<R: Resource> RecordStore<R> for PgStore<R> {
    async fn find_all(&self) -> Result<Vec<R>, StoreError> {
        let sql = format!("SELECT doc FROM {}", Self::table());
        let rows: Vec<(Json<serde_json::Value>,)> =
            sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(|(doc,)| Self::decode(doc.0)).collect()
    }

    async fn insert(&self, record: R) -> Result<R, StoreError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", Self::table());
        sqlx::query(&sql)
            .bind(record.id().as_uuid())
            .bind(Json(Self::encode(&record)?))
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", Self::table());
        let row: Option<(Json<serde_json::Value>,)> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(doc,)| Self::decode(doc.0)).transpose()
    }

    async fn replace(&self, record: R) -> Result<Option<R>, StoreError> {
        let sql = format!("UPDATE {} SET doc = $2 WHERE id = $1", Self::table());
        let result = sqlx::query(&sql)
            .bind(record.id().as_uuid())
            .bind(Json(Self::encode(&record)?))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn delete(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING doc", Self::table());
        let row: Option<(Json<serde_json::Value>,)> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(doc,)| Self::decode(doc.0)).transpose()
    }
}
