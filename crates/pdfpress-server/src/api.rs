//! HTTP routes and error mapping.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use pdfpress_core::{ConvertError, ErrorKind, UploadedFile};
use pdfpress_render::ConversionPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

/// Shared state behind every handler: the pipeline, cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ConversionPipeline>,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: Arc<ConversionPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Application-specific error types for the API
#[derive(Debug)]
pub enum AppError {
    /// The request itself was unusable (bad multipart, missing file).
    BadRequest(String),
    /// The pipeline rejected or failed the conversion.
    Convert(ConvertError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Convert(e) => {
                let status = match e.kind() {
                    ErrorKind::Unsupported => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    ErrorKind::Malformed => StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    // The detailed cause stays in the logs, not the response.
                    error!("conversion failed: {e}");
                }
                (status, e.user_message())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        Self::Convert(err)
    }
}

/// Build the application router with all routes configured
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pdfpress",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Convert an uploaded document to PDF and return it as an attachment.
pub async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("unreadable multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::BadRequest("upload has no file name".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("unreadable file field: {e}")))?;
            upload = Some(UploadedFile::new(file_name, bytes.to_vec()));
            break;
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest("no file provided in upload".to_string()))?;
    let attachment = format!("{}.pdf", sanitize_file_stem(upload.stem()));

    // Rendering is synchronous; keep it off the async workers.
    let pipeline = Arc::clone(&state.pipeline);
    let converted = tokio::task::spawn_blocking(move || pipeline.convert(&upload))
        .await
        .map_err(|e| {
            AppError::Convert(ConvertError::RenderFailure(format!(
                "conversion task aborted: {e}"
            )))
        })??;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", "application/pdf".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{attachment}\""),
            ),
        ],
        converted.into_bytes(),
    )
        .into_response())
}

/// Reduce a client-supplied file stem to characters safe inside a
/// `Content-Disposition` header.
fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect();
    let trimmed = cleaned.trim_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        "converted".to_string()
    } else {
        trimmed
    }
}
