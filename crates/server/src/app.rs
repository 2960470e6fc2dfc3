//! HTTP surface: router, CORS and handlers.

use crate::error::ApiError;
use crate::generator::NoticeGenerator;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use notice_core::ResponseFormat;
use notice_prompt::NoticeFields;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

const HEALTH_MESSAGE: &str = "School Notice Generator API is running.";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<NoticeGenerator>,
    pub response_format: ResponseFormat,
}

/// Body of `POST /generate-notice`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateNoticeRequest {
    #[serde(flatten)]
    pub fields: NoticeFields,

    /// Wrap the notice in a standalone HTML document
    #[serde(default)]
    pub full_document: Option<bool>,
}

/// Build the application router.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/generate-notice", post(generate_notice))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers mirror the request.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": HEALTH_MESSAGE }))
}

async fn generate_notice(
    State(state): State<AppState>,
    payload: Result<Json<GenerateNoticeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    tracing::info!(notice_type = %request.fields.notice_type, "Generating notice");

    let notice = state
        .generator
        .generate(request.fields, request.full_document)
        .await?;

    let response = match state.response_format {
        ResponseFormat::Json => Json(json!({ "notice": notice })).into_response(),
        ResponseFormat::Html => Html(notice).into_response(),
    };
    Ok(response)
}
