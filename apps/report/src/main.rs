mod config;
mod errors;
mod llm;
mod parse;
mod pipeline;
mod prompt;
mod render;
mod schema;
mod transcript;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm::GeminiClient;
use crate::pipeline::ReportOptions;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interview report generator v{}", env!("CARGO_PKG_VERSION"));

    let client = GeminiClient::new(config.api_key.clone(), config.model.clone());
    info!("LLM client initialized (model: {})", config.model);

    let options = ReportOptions::new(config.rubric, config.layout, &config.output_dir);
    let path = pipeline::load_and_run(&config.input_path, &client, &options).await?;

    println!("Report saved as {}", path.display());
    Ok(())
}
