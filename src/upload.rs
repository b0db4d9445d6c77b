//! Audio upload persistence.
//!
//! Uploads land in a shared scratch directory under a generated name built
//! from the original base name, a random token, and the original extension,
//! so concurrent uploads with identical filenames never collide. Files are
//! deleted again once transcription has been persisted.

use crate::error::ApiError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// MIME types accepted for transcription. Checked before anything touches
/// the disk.
pub const ALLOWED_AUDIO_TYPES: &[&str] = &[
    "audio/webm",
    "audio/mp4",
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
];

/// Reject non-audio uploads. Codec parameters ("audio/webm;codecs=opus")
/// are ignored for the comparison.
pub fn ensure_allowed_audio(mime: &str) -> Result<(), ApiError> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    if ALLOWED_AUDIO_TYPES.contains(&essence) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(mime.to_string()))
    }
}

/// Build a collision-resistant storage name: `{base}-{uuid}{ext}`.
pub fn unique_file_name(original: &str) -> String {
    let original = Path::new(original);
    let base = original
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("audio");
    let token = Uuid::new_v4();

    match original.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{base}-{token}.{ext}"),
        None => format!("{base}-{token}"),
    }
}

/// A persisted upload awaiting transcription.
#[derive(Debug, Clone)]
pub struct StoredAudio {
    /// Generated name, recorded on the transcript as `fileName`.
    pub file_name: String,
    pub path: PathBuf,
}

/// Write uploaded bytes into the scratch directory, creating it on first
/// use. Directory creation is idempotent.
pub async fn save_audio(
    dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<StoredAudio, ApiError> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create uploads directory {}", dir.display()))?;

    let file_name = unique_file_name(original_name);
    let path = dir.join(&file_name);

    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("failed to write upload {}", path.display()))?;

    info!("Stored upload {} ({} bytes)", path.display(), bytes.len());

    Ok(StoredAudio { file_name, path })
}
