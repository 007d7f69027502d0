//! Plan generation core: prompt construction and response normalization.
//!
//! Both halves are pure functions over the shared domain types; the actual
//! model call lives in `services::openai` and is the only suspension point.

pub mod normalize;
pub mod prompt;

pub use normalize::normalize_plan;
pub use prompt::{build_prompt, SYSTEM_PROMPT};

use thiserror::Error;

/// Failures on the path from model request to normalized plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The model call succeeded but returned no message content.
    #[error("model returned no content")]
    EmptyResponse,

    /// The model returned text that is not a valid JSON document. This is the
    /// only failure the normalizer itself can raise; no repair is attempted.
    #[error("model response was not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Network failure or a non-success status from the model API.
    #[error("model request failed: {0}")]
    Upstream(anyhow::Error),
}
