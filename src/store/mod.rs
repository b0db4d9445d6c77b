//! Document-style persistence over SQLite.
//!
//! Two collections back the whole service:
//! - `meetings` keyed by the externally supplied `roomId`
//! - `transcripts` keyed by a generated id, with a denormalized `meetingId`
//!   string referencing `Meeting.roomId`
//!
//! List-shaped fields (participants, transcriptIds, segments) are stored as
//! JSON columns rather than join tables, mirroring the document model the API
//! exposes.

mod db;
mod meeting;
mod transcript;

pub use db::Store;
pub use meeting::{Meeting, MeetingStatus};
pub use transcript::{NewTranscript, Segment, Transcript, TranscriptSummary};
