use crate::error::GenerationResult;
use crate::flows::backend::{require_text, run_json_flow, GenerationBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantInput {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssistantReply {
    pub response: String,
}

fn prompt(query: &str) -> String {
    format!(
        "You are a helpful assistant for a property management app. Landlords ask \
         you about tenants, leases, maintenance, rent collection and listings. \
         Answer concisely and practically.\n\
         \n\
         Question: {}\n\
         \n\
         Respond with only a JSON object of the form {{\"response\": string}}.",
        query.trim()
    )
}

/// Answer a free-form question from the dashboard chat.
pub async fn ask_assistant(
    backend: &dyn GenerationBackend,
    input: &AssistantInput,
) -> GenerationResult<AssistantReply> {
    require_text("query", &input.query)?;
    run_json_flow(backend, "askAssistant", &prompt(&input.query)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::flows::backend::MockGenerationBackend;

    #[tokio::test]
    async fn test_reply_is_decoded() {
        let mut backend = MockGenerationBackend::new();
        backend
            .expect_generate_json()
            .withf(|prompt| prompt.contains("Question: When is rent due?"))
            .returning(|_| Ok("```json\n{\"response\": \"On the 1st.\"}\n```".to_string()));

        let input = AssistantInput {
            query: " When is rent due? ".to_string(),
        };
        let reply = ask_assistant(&backend, &input).await.unwrap();
        assert_eq!(reply.response, "On the 1st.");
    }

    #[tokio::test]
    async fn test_extra_fields_are_rejected() {
        let mut backend = MockGenerationBackend::new();
        backend
            .expect_generate_json()
            .returning(|_| Ok(r#"{"response": "ok", "confidence": 0.9}"#.to_string()));

        let input = AssistantInput {
            query: "hello".to_string(),
        };
        let err = ask_assistant(&backend, &input).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }
}
