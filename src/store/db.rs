use crate::error::ApiError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Schema is applied statement-by-statement on connect; every statement is
/// idempotent so reconnecting against an existing database is a no-op.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS meetings (
        room_id        TEXT PRIMARY KEY,
        title          TEXT NOT NULL,
        start_time     TEXT NOT NULL,
        end_time       TEXT,
        participants   TEXT NOT NULL DEFAULT '[]',
        transcript_ids TEXT NOT NULL DEFAULT '[]',
        status         TEXT NOT NULL DEFAULT 'ongoing',
        created_at     TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS transcripts (
        id         TEXT PRIMARY KEY,
        meeting_id TEXT NOT NULL,
        file_name  TEXT NOT NULL,
        text       TEXT NOT NULL,
        duration   REAL NOT NULL DEFAULT 0,
        segments   TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_transcripts_meeting_id ON transcripts (meeting_id)",
];

/// Handle to both collections. Cheap to clone; wraps a connection pool.
#[derive(Clone)]
pub struct Store {
    pub(crate) pool: SqlitePool,
}

impl Store {
    /// Connect to the database, creating the file and schema if needed.
    pub async fn connect(url: &str) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);

        // An in-memory database exists per connection; pin the pool to a
        // single long-lived connection so all queries see the same data.
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        info!("Connected to database: {}", url);
        Ok(Self { pool })
    }
}
