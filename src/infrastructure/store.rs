//! 记录存储抽象

use async_trait::async_trait;

use crate::core::resource::{RecordId, Resource};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("存储后端错误: {0}")]
    Backend(String),
    #[error("文档损坏: {0}")]
    Corrupted(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// 单一资源类型的持久化集合
///
/// 每个操作只在单条记录上保证原子性，跨记录没有事务。
#[async_trait]
pub trait RecordStore<R: Resource>: Send + Sync {
    /// 返回全部记录，不保证顺序
    async fn find_all(&self) -> Result<Vec<R>, StoreError>;

    async fn insert(&self, record: R) -> Result<R, StoreError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, StoreError>;

    /// 整体替换，id 不存在时返回 `None`
    async fn replace(&self, record: R) -> Result<Option<R>, StoreError>;

    /// 删除并返回被删除的记录
    async fn delete(&self, id: RecordId) -> Result<Option<R>, StoreError>;
}
