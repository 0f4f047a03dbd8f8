//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 删除成功后的确认消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(store: &'static str) -> Self {
        Self {
            status: "healthy",
            store,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
