use super::Store;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

/// One timed span of the provider's verbose transcription output. Stored for
/// reference; nothing downstream consumes these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<i64>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub avg_logprob: f64,
    #[serde(default)]
    pub compression_ratio: f64,
    #[serde(default)]
    pub no_speech_prob: f64,
}

/// A persisted transcription of one uploaded audio segment. Created once per
/// successful provider call, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    /// Denormalized string key referencing `Meeting.roomId`.
    pub meeting_id: String,
    /// Generated storage name of the source audio; the audio itself is not
    /// retained after processing.
    pub file_name: String,
    pub text: String,
    /// Seconds, as reported by the provider.
    pub duration: f64,
    pub segments: Vec<Segment>,
    pub created_at: DateTime<Utc>,
}

/// Projection used by list endpoints: full rows minus the segment payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSummary {
    pub id: String,
    pub text: String,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by a transcription call; id and timestamp are generated
/// on insert.
#[derive(Debug, Clone)]
pub struct NewTranscript {
    pub meeting_id: String,
    pub file_name: String,
    pub text: String,
    pub duration: f64,
    pub segments: Vec<Segment>,
}

fn transcript_from_row(row: &SqliteRow) -> Result<Transcript, sqlx::Error> {
    Ok(Transcript {
        id: row.try_get("id")?,
        meeting_id: row.try_get("meeting_id")?,
        file_name: row.try_get("file_name")?,
        text: row.try_get("text")?,
        duration: row.try_get("duration")?,
        segments: row.try_get::<Json<Vec<Segment>>, _>("segments")?.0,
        created_at: row.try_get("created_at")?,
    })
}

impl Store {
    pub async fn insert_transcript(&self, new: NewTranscript) -> Result<Transcript, ApiError> {
        let transcript = Transcript {
            id: Uuid::new_v4().to_string(),
            meeting_id: new.meeting_id,
            file_name: new.file_name,
            text: new.text,
            duration: new.duration,
            segments: new.segments,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO transcripts (id, meeting_id, file_name, text, duration, segments, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&transcript.id)
        .bind(&transcript.meeting_id)
        .bind(&transcript.file_name)
        .bind(&transcript.text)
        .bind(transcript.duration)
        .bind(Json(&transcript.segments))
        .bind(transcript.created_at)
        .execute(&self.pool)
        .await?;

        Ok(transcript)
    }

    /// All transcripts for a meeting, newest first.
    pub async fn transcripts_for_meeting(
        &self,
        meeting_id: &str,
    ) -> Result<Vec<TranscriptSummary>, ApiError> {
        let rows = sqlx::query(
            "SELECT id, text, duration, created_at FROM transcripts
             WHERE meeting_id = ? ORDER BY created_at DESC",
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(TranscriptSummary {
                    id: row.try_get("id")?,
                    text: row.try_get("text")?,
                    duration: row.try_get("duration")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    pub async fn get_transcript(&self, id: &str) -> Result<Option<Transcript>, ApiError> {
        let row = sqlx::query("SELECT * FROM transcripts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(transcript_from_row)
            .transpose()
            .map_err(ApiError::from)
    }
}
