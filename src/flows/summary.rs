use crate::error::GenerationResult;
use crate::flows::backend::{require_text, run_json_flow, GenerationBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryInput {
    /// Full message thread, one message per line
    pub conversation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Summary {
    pub summary: String,
}

/// Summarize a landlord/tenant message thread.
pub async fn summarize(
    backend: &dyn GenerationBackend,
    input: &SummaryInput,
) -> GenerationResult<Summary> {
    require_text("conversation", &input.conversation)?;

    let prompt = format!(
        "Summarize the following conversation between a landlord and a tenant. \
         Keep the key requests, agreements and open issues.\n\
         \n\
         Conversation:\n{}\n\
         \n\
         Respond with only a JSON object of the form {{\"summary\": string}}.",
        input.conversation
    );
    run_json_flow(backend, "summarize", &prompt).await
}
