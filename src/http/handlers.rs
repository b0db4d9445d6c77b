use super::state::AppState;
use crate::error::ApiError;
use crate::providers::{cleanup_file, AnalysisKind};
use crate::store::NewTranscript;
use crate::upload;
use axum::{
    extract::multipart::MultipartError,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    /// Required; validated by hand so the failure shape matches the envelope.
    pub room_id: Option<String>,

    /// Optional title; defaults to a value derived from the room id.
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub transcript_text: Option<String>,
    pub analysis_type: Option<String>,
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

// ============================================================================
// Meeting Handlers
// ============================================================================

/// POST /api/meetings
/// Create a new meeting; duplicate roomIds conflict instead of overwriting.
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(req): Json<CreateMeetingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = required(&req.room_id, "roomId is required")?;

    let meeting = state
        .store
        .create_meeting(room_id, req.title.as_deref())
        .await?;

    info!("Created meeting: {}", meeting.room_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": meeting })),
    ))
}

/// GET /api/meetings
/// List all meetings, newest first
pub async fn list_meetings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let meetings = state.store.list_meetings().await?;

    Ok(Json(json!({
        "success": true,
        "count": meetings.len(),
        "data": meetings,
    })))
}

/// GET /api/meetings/:room_id
/// Get a meeting together with its transcripts
pub async fn get_meeting_with_transcripts(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let meeting = state
        .store
        .get_meeting(&room_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    let transcripts = state.store.transcripts_for_meeting(&room_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "meeting": meeting, "transcripts": transcripts },
    })))
}

/// PUT /api/meetings/:room_id/end
/// End a meeting: stamp endTime, mark completed. Idempotent on repeat.
pub async fn end_meeting(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let meeting = state.store.end_meeting(&room_id).await?;

    info!("Ended meeting: {}", meeting.room_id);

    Ok(Json(json!({
        "success": true,
        "message": "Meeting ended successfully",
        "data": meeting,
    })))
}

// ============================================================================
// Transcript Handlers
// ============================================================================

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::Validation(format!("Invalid multipart request: {err}"))
    }
}

/// POST /api/transcripts/transcribe
/// Accept a multipart audio upload, transcribe it, persist the transcript,
/// and link it to the meeting (creating the meeting first if absent).
pub async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut meeting_id: Option<String> = None;
    let mut audio: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("meetingId") => {
                meeting_id = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("audio") => {
                // MIME check happens before any bytes are read or written.
                let mime = field.content_type().unwrap_or_default().to_string();
                upload::ensure_allowed_audio(&mime)?;

                let original_name = field.file_name().unwrap_or("audio").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                audio = Some((original_name, bytes));
            }
            _ => {}
        }
    }

    let (original_name, bytes) = audio
        .ok_or_else(|| ApiError::Validation("No audio file uploaded".to_string()))?;
    let meeting_id = required(&meeting_id, "Meeting ID is required")?.to_string();

    if bytes.len() > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge);
    }

    // Create the meeting on the fly if the client never registered it.
    if state.store.get_meeting(&meeting_id).await?.is_none() {
        state.store.create_meeting(&meeting_id, None).await?;
        info!("Created meeting {} for incoming transcription", meeting_id);
    }

    let stored = upload::save_audio(&state.uploads_dir, &original_name, &bytes).await?;

    let result = state
        .transcriber
        .transcribe(&stored.path)
        .await
        .map_err(|e| ApiError::TranscriptionFailed(e.to_string()))?;

    let transcript = state
        .store
        .insert_transcript(NewTranscript {
            meeting_id: meeting_id.clone(),
            file_name: stored.file_name.clone(),
            text: result.text,
            duration: result.duration,
            segments: result.segments,
        })
        .await?;

    state
        .store
        .attach_transcript(&meeting_id, &transcript.id)
        .await?;

    // The transcript is persisted; the source audio is no longer needed.
    cleanup_file(&stored.path).await;

    info!(
        "Transcribed {} for meeting {} ({:.1}s of audio)",
        stored.file_name, meeting_id, transcript.duration
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Audio transcribed successfully",
            "transcript": {
                "id": transcript.id,
                "text": transcript.text,
                "duration": transcript.duration,
            },
        })),
    ))
}

/// GET /api/transcripts/meeting/:meeting_id
/// List transcripts for a meeting, newest first
pub async fn get_transcripts_by_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transcripts = state.store.transcripts_for_meeting(&meeting_id).await?;

    Ok(Json(json!({
        "success": true,
        "count": transcripts.len(),
        "data": transcripts,
    })))
}

/// GET /api/transcripts/:id
/// Get a full transcript, segments included
pub async fn get_transcript_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transcript = state
        .store
        .get_transcript(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transcript not found".to_string()))?;

    Ok(Json(json!({ "success": true, "data": transcript })))
}

// ============================================================================
// Analysis Handlers
// ============================================================================

/// POST /api/gemini/analyze
/// Run one of the fixed analyses over transcript text. An unknown
/// analysisType is rejected before the provider is ever called.
pub async fn analyze_transcript(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let transcript_text = required(&req.transcript_text, "Transcript text is required")?;

    let kind = AnalysisKind::parse(req.analysis_type.as_deref().unwrap_or_default())
        .ok_or(ApiError::InvalidAnalysisType)?;

    let result = state
        .analyzer
        .analyze(transcript_text, kind)
        .await
        .map_err(|e| ApiError::AnalysisFailed(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "analysisType": kind,
        "result": result,
    })))
}

// ============================================================================
// Health
// ============================================================================

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}
