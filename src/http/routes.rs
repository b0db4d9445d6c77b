use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // Multipart framing adds overhead on top of the file bytes; the exact
    // per-file cap is enforced in the upload handler.
    let body_limit = state.max_upload_bytes + 64 * 1024;

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Meetings
        .route(
            "/api/meetings",
            post(handlers::create_meeting).get(handlers::list_meetings),
        )
        .route(
            "/api/meetings/:room_id",
            get(handlers::get_meeting_with_transcripts),
        )
        .route("/api/meetings/:room_id/end", put(handlers::end_meeting))
        // Transcripts
        .route(
            "/api/transcripts/transcribe",
            post(handlers::transcribe_audio).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/transcripts/meeting/:meeting_id",
            get(handlers::get_transcripts_by_meeting),
        )
        .route("/api/transcripts/:id", get(handlers::get_transcript_by_id))
        // Analysis
        .route("/api/gemini/analyze", post(handlers::analyze_transcript))
        // Browser clients call this API cross-origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
