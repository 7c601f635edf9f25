use thiserror::Error;

use crate::llm::GenerationError;
use crate::parse::ResponseParseError;
use crate::render::RenderError;
use crate::transcript::SchemaValidationError;

/// Top-level pipeline error. Every stage fails fast and propagates here;
/// there is no local recovery, no retry, and no partial-report emission.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("transcript validation failed: {0}")]
    SchemaValidation(#[from] SchemaValidationError),

    #[error("evaluation request failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("evaluation response was malformed: {0}")]
    ResponseParse(#[from] ResponseParseError),

    #[error("report rendering failed: {0}")]
    Render(#[from] RenderError),
}
