pub mod config;
pub mod error;
pub mod http;
pub mod providers;
pub mod store;
pub mod upload;

pub use config::Config;
pub use error::ApiError;
pub use http::{create_router, AppState};
pub use providers::{
    cleanup_file, AnalysisKind, Analyzer, GeminiAnalyzer, GroqTranscriber, Transcriber,
    TranscriptionResult,
};
pub use store::{Meeting, MeetingStatus, NewTranscript, Segment, Store, Transcript, TranscriptSummary};
