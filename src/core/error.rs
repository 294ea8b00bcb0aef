//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::user::service::StoreError;
use crate::infrastructure::llm::LlmError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("Failed to generate summary: {0}")]
    Upstream(#[from] LlmError),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl CoreError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        CoreError::BadRequest(message.into())
    }

    pub fn user_not_found() -> Self {
        CoreError::NotFound("User not found".to_string())
    }

    /// 附带操作描述的存储错误，描述会原样返回给客户端
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| CoreError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Storage { .. } | CoreError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            CoreError::BadRequest(msg) | CoreError::NotFound(msg) => msg,
            CoreError::Storage { message, source } => {
                error!("{}: {}", message, source);
                message.to_string()
            }
            CoreError::Upstream(err) => {
                error!("Summary request failed: {}", err);
                "Failed to generate summary".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
