//! HTTP API server for the meeting-transcription backend.
//!
//! This module exposes the REST surface over meetings, transcripts, and
//! analysis:
//! - POST /api/meetings - Create a meeting
//! - GET  /api/meetings - List all meetings
//! - GET  /api/meetings/:room_id - Meeting with its transcripts
//! - PUT  /api/meetings/:room_id/end - End a meeting
//! - POST /api/transcripts/transcribe - Upload audio, transcribe, persist
//! - GET  /api/transcripts/meeting/:meeting_id - Transcripts for a meeting
//! - GET  /api/transcripts/:id - Transcript by id
//! - POST /api/gemini/analyze - Run one of the fixed analyses
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
