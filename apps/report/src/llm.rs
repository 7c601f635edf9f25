//! Evaluation Requester — the single point of entry for LLM calls.
//!
//! All model interactions go through the `Evaluator` trait so the pipeline
//! can be exercised with a stub service in tests. The production
//! implementation talks to the Gemini `generateContent` REST API with a
//! zero sampling temperature.
//!
//! Deliberately single-shot: no retry, no backoff, no client timeout. The
//! call runs to completion or fails outright, and every failure surfaces as
//! a `GenerationError` for the pipeline to propagate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::prompt::EVALUATION_SYSTEM;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The evaluation capability. One prompt in, raw response text out.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Production evaluator backed by the Gemini REST API.
///
/// The API key and model identifier are injected from configuration; neither
/// is ever a literal in source.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Evaluator for GeminiClient {
    async fn evaluate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: EVALUATION_SYSTEM,
                }],
            },
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        let text = generated.text().ok_or(GenerationError::EmptyContent)?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyContent);
        }

        debug!(chars = text.len(), "generation succeeded");
        Ok(text.to_string())
    }
}
