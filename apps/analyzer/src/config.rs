use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_PATH: &str = "screenshots/linkedin.png";
pub const DEFAULT_OUTPUT_DIR: &str = "linkedin_analysis_output";

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing or a numeric value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub image_path: PathBuf,
    pub output_dir: PathBuf,
    pub llm_timeout_secs: u64,
    /// Total attempts per model call, including the first one.
    pub llm_max_attempts: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests do not touch process env.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let llm_timeout_secs = optional("LLM_TIMEOUT_SECS", "120")
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
        let llm_max_attempts = optional("LLM_MAX_ATTEMPTS", "1")
            .parse::<u32>()
            .context("LLM_MAX_ATTEMPTS must be a positive integer")?
            .max(1);

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'GEMINI_API_KEY' is not set")?,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base: optional("GEMINI_API_BASE", DEFAULT_API_BASE),
            image_path: PathBuf::from(optional("PROFILE_IMAGE_PATH", DEFAULT_IMAGE_PATH)),
            output_dir: PathBuf::from(optional("OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
            llm_timeout_secs,
            llm_max_attempts,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}
