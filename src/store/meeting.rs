use super::Store;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::Row;

/// Lifecycle of a meeting. New meetings start `ongoing`; the explicit
/// end-meeting action moves them to `completed`. `scheduled` exists in the
/// contract but nothing in this service currently sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Ongoing,
    Completed,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Ongoing => "ongoing",
            MeetingStatus::Completed => "completed",
        }
    }

    fn parse(s: &str) -> Result<Self, sqlx::Error> {
        match s {
            "scheduled" => Ok(MeetingStatus::Scheduled),
            "ongoing" => Ok(MeetingStatus::Ongoing),
            "completed" => Ok(MeetingStatus::Completed),
            other => Err(sqlx::Error::Decode(
                format!("unknown meeting status: {other}").into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// External correlation key, doubles as the video-room identifier.
    pub room_id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub participants: Vec<String>,
    /// Redundant list of transcript references, appended on each successful
    /// transcription. The transcripts collection is the source of truth.
    pub transcript_ids: Vec<String>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
}

fn meeting_from_row(row: &SqliteRow) -> Result<Meeting, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Meeting {
        room_id: row.try_get("room_id")?,
        title: row.try_get("title")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        participants: row.try_get::<Json<Vec<String>>, _>("participants")?.0,
        transcript_ids: row.try_get::<Json<Vec<String>>, _>("transcript_ids")?.0,
        status: MeetingStatus::parse(&status)?,
        created_at: row.try_get("created_at")?,
    })
}

impl Store {
    /// Create a meeting. Fails with `Conflict` if the roomId is already
    /// taken; a duplicate never overwrites the existing record.
    pub async fn create_meeting(
        &self,
        room_id: &str,
        title: Option<&str>,
    ) -> Result<Meeting, ApiError> {
        if self.get_meeting(room_id).await?.is_some() {
            return Err(ApiError::Conflict(
                "Meeting with this roomId already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let meeting = Meeting {
            room_id: room_id.to_string(),
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("Meeting {room_id}")),
            start_time: now,
            end_time: None,
            participants: Vec::new(),
            transcript_ids: Vec::new(),
            status: MeetingStatus::Ongoing,
            created_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO meetings
                (room_id, title, start_time, end_time, participants, transcript_ids, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&meeting.room_id)
        .bind(&meeting.title)
        .bind(meeting.start_time)
        .bind(meeting.end_time)
        .bind(Json(&meeting.participants))
        .bind(Json(&meeting.transcript_ids))
        .bind(meeting.status.as_str())
        .bind(meeting.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(meeting),
            // Two concurrent creates can both pass the pre-check; the
            // PRIMARY KEY constraint settles the race.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(ApiError::Conflict(
                "Meeting with this roomId already exists".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// All meetings, newest first.
    pub async fn list_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        let rows = sqlx::query("SELECT * FROM meetings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| meeting_from_row(row).map_err(ApiError::from))
            .collect()
    }

    pub async fn get_meeting(&self, room_id: &str) -> Result<Option<Meeting>, ApiError> {
        let row = sqlx::query("SELECT * FROM meetings WHERE room_id = ?")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(meeting_from_row).transpose().map_err(ApiError::from)
    }

    /// End a meeting: stamp `endTime` and mark it completed. Re-ending an
    /// already-completed meeting simply re-stamps `endTime`.
    pub async fn end_meeting(&self, room_id: &str) -> Result<Meeting, ApiError> {
        let result = sqlx::query(
            "UPDATE meetings SET end_time = ?, status = 'completed' WHERE room_id = ?",
        )
        .bind(Utc::now())
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Meeting not found".to_string()));
        }

        self.get_meeting(room_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))
    }

    /// Append a transcript reference to the meeting's `transcriptIds`.
    /// Append-only; does not touch meeting status.
    pub async fn attach_transcript(
        &self,
        room_id: &str,
        transcript_id: &str,
    ) -> Result<(), ApiError> {
        let result = sqlx::query(
            "UPDATE meetings
             SET transcript_ids = json_insert(transcript_ids, '$[#]', ?)
             WHERE room_id = ?",
        )
        .bind(transcript_id)
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Meeting not found".to_string()));
        }

        Ok(())
    }
}
