use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::prompt::RubricStyle;
use crate::render::LayoutStyle;

/// Application configuration loaded from environment variables.
///
/// The API key is the only required variable; it is never a literal in
/// source. Everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub layout: LayoutStyle,
    pub rubric: RubricStyle,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_env("GEMINI_API_KEY")?,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            input_path: std::env::var("INTERVIEW_FILE")
                .unwrap_or_else(|_| "interview_data.json".to_string())
                .into(),
            output_dir: std::env::var("REPORT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            layout: parse_layout(
                &std::env::var("REPORT_LAYOUT").unwrap_or_else(|_| "plain".to_string()),
            )?,
            rubric: parse_rubric(
                &std::env::var("REPORT_RUBRIC").unwrap_or_else(|_| "detailed".to_string()),
            )?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_layout(value: &str) -> Result<LayoutStyle> {
    match value {
        "plain" => Ok(LayoutStyle::Plain),
        "table" => Ok(LayoutStyle::Table),
        other => bail!("REPORT_LAYOUT must be 'plain' or 'table', got '{other}'"),
    }
}

fn parse_rubric(value: &str) -> Result<RubricStyle> {
    match value {
        "detailed" => Ok(RubricStyle::Detailed),
        "concise" => Ok(RubricStyle::Concise),
        other => bail!("REPORT_RUBRIC must be 'detailed' or 'concise', got '{other}'"),
    }
}
