//! Speech-to-text via Groq's OpenAI-compatible transcription endpoint.

use super::Transcriber;
use crate::config::GroqConfig;
use crate::store::Segment;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Subset of the provider's `verbose_json` response that this service keeps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    /// Seconds. Absent for some formats, defaults to 0.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

pub struct GroqTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqTranscriber {
    pub fn new(cfg: &GroqConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        }
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<TranscriptionResult> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read audio file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        debug!("Transcribing {} ({} bytes)", file_name, bytes.len());

        // Deterministic decoding with segment-level timestamps, matching the
        // verbose_json shape the store persists.
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name))
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .text("temperature", "0");

        let response = self
            .client
            .post(format!("{}/openai/v1/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("transcription request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("transcription provider returned {status}: {body}");
        }

        response
            .json::<TranscriptionResult>()
            .await
            .context("failed to decode transcription response")
    }
}

/// Best-effort removal of a processed upload. Called after the transcript has
/// been persisted; a failed delete is logged and never fails the request.
pub async fn cleanup_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => info!("Deleted processed upload: {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to delete upload {}: {}", path.display(), e),
    }
}
