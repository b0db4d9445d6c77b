use anyhow::Result;
use clap::Parser;
use meetscribe::{create_router, AppState, Config, GeminiAnalyzer, GroqTranscriber, Store};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "meetscribe", about = "Meeting transcription and analysis backend")]
struct Cli {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/meetscribe")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Provider keys are commonly kept in .env during development.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let store = Store::connect(&cfg.database.url).await?;

    let state = AppState::new(
        store,
        Arc::new(GroqTranscriber::new(&cfg.providers.groq)),
        Arc::new(GeminiAnalyzer::new(&cfg.providers.gemini)),
        PathBuf::from(&cfg.uploads.dir),
        cfg.uploads.max_upload_bytes,
    );

    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
