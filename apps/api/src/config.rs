use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::generation::router::ScholarshipRouting;
use crate::intake::AppVariant;
use crate::llm_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub variant: AppVariant,
    /// Secret for `/admin/download-csv`. When unset, every download is refused.
    pub admin_secret_key: Option<String>,
    pub records_path: PathBuf,
    pub scholarship_routing: ScholarshipRouting,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let variant = optional_env("APP_VARIANT")
            .map(|v| v.parse::<AppVariant>())
            .transpose()?
            .unwrap_or_default();

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            variant,
            admin_secret_key: optional_env("ADMIN_SECRET_KEY"),
            records_path: optional_env("RECORDS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| variant.default_records_path()),
            scholarship_routing: optional_env("SCHOLARSHIP_BRANCHING")
                .map(|v| v.parse::<ScholarshipRouting>())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
