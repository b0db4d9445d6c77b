use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection string (e.g. "sqlite://meetscribe.db").
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Scratch directory for uploaded audio, created lazily on first use.
    pub dir: String,

    /// Transport-level cap on a single upload (default 100 MiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    pub groq: GroqConfig,
    pub gemini: GeminiConfig,
}

/// Speech-to-text provider (OpenAI-compatible transcription endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

/// Generative-text provider (Gemini generateContent endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

impl Config {
    /// Load configuration from a file, with `MEETSCRIBE__*` environment
    /// overrides (e.g. `MEETSCRIBE__SERVICE__HTTP__PORT=8080`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MEETSCRIBE").separator("__"))
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        // Plain env vars win for secrets and the listen port.
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            cfg.providers.groq.api_key = key;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            cfg.providers.gemini.api_key = key;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            cfg.service.http.port = port;
        }

        Ok(cfg)
    }
}
