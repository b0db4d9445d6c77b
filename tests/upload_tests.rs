// Tests for upload validation and collision-resistant storage names.

use meetscribe::upload::{ensure_allowed_audio, save_audio, unique_file_name, ALLOWED_AUDIO_TYPES};
use std::collections::HashSet;

#[test]
fn test_allow_list_accepts_every_audio_type() {
    for mime in ALLOWED_AUDIO_TYPES {
        assert!(ensure_allowed_audio(mime).is_ok(), "{mime} should be allowed");
    }
}

#[test]
fn test_allow_list_ignores_codec_parameters() {
    assert!(ensure_allowed_audio("audio/webm;codecs=opus").is_ok());
    assert!(ensure_allowed_audio("audio/ogg; codecs=vorbis").is_ok());
}

#[test]
fn test_non_audio_types_are_rejected() {
    for mime in ["video/webm", "text/plain", "application/octet-stream", "", "audio/flac"] {
        assert!(ensure_allowed_audio(mime).is_err(), "{mime:?} should be rejected");
    }
}

#[test]
fn test_unique_file_name_keeps_base_and_extension() {
    let name = unique_file_name("recording.webm");
    assert!(name.starts_with("recording-"));
    assert!(name.ends_with(".webm"));
    assert_ne!(name, "recording.webm");
}

#[test]
fn test_unique_file_name_without_extension() {
    let name = unique_file_name("recording");
    assert!(name.starts_with("recording-"));
    assert!(!name.contains('.'));
}

#[test]
fn test_unique_file_name_handles_empty_original() {
    let name = unique_file_name("");
    assert!(name.starts_with("audio-"));
}

#[test]
fn test_identical_originals_never_collide() {
    // Two concurrent uploads with the same original filename must land under
    // distinct names on disk.
    let mut seen = HashSet::new();
    for _ in 0..100 {
        assert!(seen.insert(unique_file_name("chunk.webm")));
    }
}

#[tokio::test]
async fn test_save_audio_creates_directory_lazily() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let uploads = dir.path().join("nested").join("uploads");
    assert!(!uploads.exists());

    let stored = save_audio(&uploads, "chunk.webm", b"bytes").await?;

    assert!(stored.path.exists());
    assert_eq!(std::fs::read(&stored.path)?, b"bytes");
    assert_eq!(stored.path.file_name().unwrap().to_str().unwrap(), stored.file_name);

    // Second save into the existing directory is fine.
    let again = save_audio(&uploads, "chunk.webm", b"more").await?;
    assert_ne!(again.file_name, stored.file_name);

    Ok(())
}
