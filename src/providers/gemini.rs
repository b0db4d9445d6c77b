//! Transcript analysis via Gemini's `generateContent` endpoint.

use super::Analyzer;
use crate::config::GeminiConfig;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// The three supported analyses. Each selects a fixed prompt template that
/// embeds the transcript text verbatim; there is no chunking or truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisKind {
    Summary,
    ActionItems,
    MinutesOfMeeting,
}

impl AnalysisKind {
    /// Strict wire-name parse; anything else is an invalid analysis type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "summary" => Some(AnalysisKind::Summary),
            "actionItems" => Some(AnalysisKind::ActionItems),
            "minutesOfMeeting" => Some(AnalysisKind::MinutesOfMeeting),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Summary => "summary",
            AnalysisKind::ActionItems => "actionItems",
            AnalysisKind::MinutesOfMeeting => "minutesOfMeeting",
        }
    }

    fn prompt(&self, transcript_text: &str) -> String {
        match self {
            AnalysisKind::Summary => format!(
                "You are an expert meeting assistant. Below is a transcript of a meeting. \
                 Please provide a concise summary of the key points discussed. Focus on \
                 the main topics, decisions made, and important information shared. Keep \
                 it under 300 words and make it professionally written.\n\n\
                 Meeting Transcript:\n{transcript_text}"
            ),
            AnalysisKind::ActionItems => format!(
                "You are an expert meeting assistant. Below is a transcript of a meeting. \
                 Please extract all action items and priorities mentioned. Format each \
                 action item as a clear, actionable statement. Include who is responsible \
                 (if mentioned) and any deadlines discussed. List only concrete tasks and \
                 commitments made during the meeting.\n\n\
                 Meeting Transcript:\n{transcript_text}"
            ),
            AnalysisKind::MinutesOfMeeting => format!(
                "You are an expert meeting assistant. Below is a transcript of a meeting. \
                 Please create formal minutes of the meeting. Include the following \
                 sections:\n\
                 1. Attendees (extract names if mentioned)\n\
                 2. Agenda Items Discussed (formatted as headers with bullet points under each)\n\
                 3. Decisions Made\n\
                 4. Discussion Points\n\n\
                 Format this as a professional document that could be shared with all \
                 meeting participants.\n\n\
                 Meeting Transcript:\n{transcript_text}"
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiAnalyzer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(cfg: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        }
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, transcript_text: &str, kind: AnalysisKind) -> Result<String> {
        let prompt = kind.prompt(transcript_text);

        debug!(
            "Requesting {} analysis ({} transcript chars)",
            kind.as_str(),
            transcript_text.len()
        );

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .context("analysis request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("analysis provider returned {status}: {body}");
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("failed to decode analysis response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("analysis provider returned no candidates"))?;

        Ok(text.trim().to_string())
    }
}
