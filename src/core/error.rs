//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::infrastructure::store::StoreError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    /// 请求体无法构成合法记录
    BadRequest(String),
    /// 记录不存在，响应体为纯文本
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::InternalServerError(err.to_string())
    }
}

/// 请求体不是 JSON 或缺少 JSON 内容类型，按校验失败处理
impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::NotFound(msg) => return (StatusCode::NOT_FOUND, msg).into_response(),
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::InternalServerError(msg) => {
                error!("存储操作失败: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Request failed".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}
