use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ts_core::domain::error::RewriteFailure;
use ts_core::domain::types::{tone_catalog, ErrorResponse, RewriteRequest, RewriteResponse, ToneInfo};
use ts_core::infra::metrics::MetricsSummary;
use ts_core::usecase::rewrite_service::RewriteService;

/// API エラー型（RewriteFailure を HTTP ステータス + JSON に変換）
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ApiError(#[from] RewriteFailure);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.0.message,
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub generator: String,
}

/// ルーターを構築する
pub fn router(service: Arc<RewriteService>) -> Router {
    Router::new()
        .route("/", get(|| async { "ToneShift" }))
        .route("/health", get(health))
        .route("/api/rewrite", post(rewrite))
        .route("/api/tones", get(list_tones))
        .route("/api/metrics", get(get_metrics))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// --- Handlers ---

/// ボディを RewriteRequest として解釈する（Content-Type は問わない）
///
/// 欠落・型違いのフィールドはバリデーションに回し、JSON として読めないボディは
/// 内部失敗として扱う。
fn parse_body(body: &[u8]) -> Result<RewriteRequest, RewriteFailure> {
    match serde_json::from_slice::<RewriteRequest>(body) {
        Ok(request) => Ok(request),
        Err(e) if e.classify() == serde_json::error::Category::Data => {
            tracing::debug!("rewrite body has unusable fields: {e}");
            Ok(RewriteRequest::default())
        }
        Err(e) => {
            tracing::error!("rewrite body is not valid JSON: {e}");
            Err(RewriteFailure::provider())
        }
    }
}

async fn rewrite(
    State(service): State<Arc<RewriteService>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RewriteResponse> {
    let body = body.map_err(|rejection| {
        tracing::error!("failed to read rewrite body: {rejection}");
        RewriteFailure::provider()
    })?;
    let request = parse_body(&body)?;

    let response = service.rewrite(request).await?;
    Ok(Json(response))
}

async fn list_tones() -> Json<Vec<ToneInfo>> {
    Json(tone_catalog())
}

async fn get_metrics(State(service): State<Arc<RewriteService>>) -> Json<MetricsSummary> {
    Json(service.metrics())
}

async fn health(State(service): State<Arc<RewriteService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        generator: service.generator_name().to_string(),
    })
}
