//! HTTP mapping for [`AppError`] and request body rejections.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notice_core::AppError;
use serde_json::json;

/// Error returned by handlers, rendered as `{"error": code, "detail": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// Failure inside the generation pipeline
    App(AppError),

    /// Body that could not be read as a notice request
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::App(AppError::EmptyResponse(_)) => StatusCode::BAD_GATEWAY,
            Self::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::App(err) => err.code(),
            Self::Rejected { .. } => "invalid_request",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::App(err) => err.detail(),
            Self::Rejected { detail, .. } => detail.clone(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::App(ref err) => {
                tracing::error!(code = err.code(), status = status.as_u16(), "{}", err)
            }
            Self::Rejected { ref detail, .. } => {
                tracing::warn!(status = status.as_u16(), "Rejected request body: {}", detail)
            }
        }

        let body = json!({
            "error": self.code(),
            "detail": self.detail(),
        });
        (status, Json(body)).into_response()
    }
}
