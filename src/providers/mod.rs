//! External model providers behind trait seams.
//!
//! Handlers depend on `Transcriber` and `Analyzer` rather than concrete
//! clients, so tests can substitute mocks and providers can be swapped
//! without touching the HTTP surface. Provider errors surface with their
//! original message; no retries are attempted at this layer.

mod gemini;
mod whisper;

pub use gemini::{AnalysisKind, GeminiAnalyzer};
pub use whisper::{cleanup_file, GroqTranscriber, TranscriptionResult};

use async_trait::async_trait;
use std::path::Path;

/// Speech-to-text over a locally stored audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, path: &Path) -> anyhow::Result<TranscriptionResult>;
}

/// Generative analysis of full transcript text. The transcript is passed
/// through verbatim; any length limits are the provider's to enforce.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, transcript_text: &str, kind: AnalysisKind) -> anyhow::Result<String>;
}
