//! Error taxonomy for the HTTP surface.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl renders
//! the `{success: false, ...}` JSON envelope so no failure ever escapes as a raw
//! error body or a stack trace.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request field.
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique key (e.g. meeting roomId already taken).
    #[error("{0}")]
    Conflict(String),

    /// Requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Upload rejected before anything is written: MIME type not in the
    /// audio allow-list.
    #[error("Unsupported file type '{0}'. Only audio files are allowed.")]
    UnsupportedMediaType(String),

    /// Upload rejected by the transport-level size cap.
    #[error("Audio file exceeds the upload size limit")]
    PayloadTooLarge,

    /// `analysisType` outside {summary, actionItems, minutesOfMeeting};
    /// rejected before any provider call.
    #[error("Valid analysis type is required (summary, actionItems, or minutesOfMeeting)")]
    InvalidAnalysisType,

    /// Speech-to-text provider failure, message passed through verbatim.
    #[error("Failed to transcribe audio: {0}")]
    TranscriptionFailed(String),

    /// Generative-text provider failure, message passed through verbatim.
    #[error("Failed to analyze transcript: {0}")]
    AnalysisFailed(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::InvalidAnalysisType => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TranscriptionFailed(_)
            | ApiError::AnalysisFailed(_)
            | ApiError::Database(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        // 4xx responses carry the specific message; 5xx responses keep a
        // generic message and pass the underlying error text alongside it.
        let body = match &self {
            ApiError::TranscriptionFailed(detail) => json!({
                "success": false,
                "message": "Failed to process audio file",
                "error": detail,
            }),
            ApiError::AnalysisFailed(detail) => json!({
                "success": false,
                "message": "Failed to analyze transcript",
                "error": detail,
            }),
            ApiError::Database(e) => json!({
                "success": false,
                "message": "Database operation failed",
                "error": e.to_string(),
            }),
            ApiError::Internal(e) => json!({
                "success": false,
                "message": "Internal server error",
                "error": e.to_string(),
            }),
            other => json!({
                "success": false,
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
