use crate::providers::{Analyzer, Transcriber};
use crate::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers. Dependencies are constructed
/// once at startup and injected here rather than living as process globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub transcriber: Arc<dyn Transcriber>,
    pub analyzer: Arc<dyn Analyzer>,
    /// Scratch directory for uploaded audio.
    pub uploads_dir: PathBuf,
    /// Size cap for a single upload, enforced at the transport layer.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        store: Store,
        transcriber: Arc<dyn Transcriber>,
        analyzer: Arc<dyn Analyzer>,
        uploads_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            transcriber,
            analyzer,
            uploads_dir,
            max_upload_bytes,
        }
    }
}
