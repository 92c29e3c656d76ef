use crate::error::{GenerationError, GenerationResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Raw audio returned by a speech model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Opaque generative-AI backend the flows delegate to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run a prompt that asks for a JSON object and return the raw text
    async fn generate_json(&self, prompt: &str) -> GenerationResult<String>;

    /// Synthesize speech for `text`
    async fn synthesize_speech(&self, text: &str) -> GenerationResult<SpeechAudio>;
}

/// Send `prompt` and decode the reply strictly into `T`.
pub(crate) async fn run_json_flow<T: DeserializeOwned>(
    backend: &dyn GenerationBackend,
    flow: &str,
    prompt: &str,
) -> GenerationResult<T> {
    debug!("Running {} flow ({} byte prompt)", flow, prompt.len());
    let raw = backend.generate_json(prompt).await?;
    serde_json::from_str(strip_code_fence(&raw)).map_err(|e| {
        GenerationError::InvalidResponse(format!("{} flow: {}", flow, e))
    })
}

/// Models sometimes wrap JSON in a markdown fence even when asked not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub(crate) fn require_text(field: &'static str, value: &str) -> GenerationResult<()> {
    if value.trim().is_empty() {
        return Err(GenerationError::InvalidInput {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn require_amount(field: &'static str, value: f64) -> GenerationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GenerationError::InvalidInput {
            field,
            reason: format!("must be a non-negative number, got {}", value),
        });
    }
    Ok(())
}
