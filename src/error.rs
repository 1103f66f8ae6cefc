use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 凭据换取失败，对需要令牌的请求是致命错误
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("token request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to get access token: {0}")]
    Auth(#[from] AuthError),
    #[error("provider rejected request with {status}: {body}")]
    UpstreamClient { status: u16, body: String },
    #[error("provider failed with {status}")]
    UpstreamServer { status: u16 },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// 按状态码归类上游响应
    pub fn from_upstream(status: StatusCode, body: String) -> Self {
        if status.is_client_error() {
            AppError::UpstreamClient {
                status: status.as_u16(),
                body,
            }
        } else {
            AppError::UpstreamServer {
                status: status.as_u16(),
            }
        }
    }

    /// 转换为对外响应；`failure_message` 用于 500 类错误
    pub fn into_api(self, failure_message: &str) -> ApiError {
        match self {
            AppError::Validation(message) => ApiError::new(StatusCode::BAD_REQUEST, message),
            // 只有上游 400 是用户可修正的输入问题
            AppError::UpstreamClient { status: 400, body } => {
                tracing::warn!("Provider rejected search (400): {}", body);
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "No results for this search. Please check the airports and dates and try again.",
                )
            }
            other => {
                tracing::error!("{}: {}", failure_message, other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
            }
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });

        (self.status, body).into_response()
    }
}
