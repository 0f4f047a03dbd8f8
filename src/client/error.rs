//! 客户端错误

/// 一次 API 调用失败的原因
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),

    /// 服务端拒绝（校验失败或通用失败）
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// 请求没有完成
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
