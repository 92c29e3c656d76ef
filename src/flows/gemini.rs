use crate::error::{GenerationError, GenerationResult};
use crate::flows::backend::{GenerationBackend, SpeechAudio};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const GEMINI_API: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Settings for [`GeminiBackend`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub speech_model: String,
    pub voice: String,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: "Algenib".to_string(),
        }
    }
}

/// Generation backend talking to the Gemini `generateContent` REST endpoint
pub struct GeminiBackend {
    client: Client,
    settings: GeminiSettings,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GeminiBackend {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    async fn generate(&self, model: &str, body: Value) -> GenerationResult<GenerateResponse> {
        let url = format!("{}/{}:generateContent", GEMINI_API, model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            warn!("Gemini returned status {}: {}", status, detail);
            return Err(GenerationError::Backend(format!("status {}", status)));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GenerationError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate_json(&self, prompt: &str) -> GenerationResult<String> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });
        let response = self.generate(&self.settings.model, body).await?;
        extract_text(response)
    }

    async fn synthesize_speech(&self, text: &str) -> GenerationResult<SpeechAudio> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": self.settings.voice } }
                }
            }
        });
        let response = self.generate(&self.settings.speech_model, body).await?;
        extract_audio(response)
    }
}

fn first_parts(response: GenerateResponse) -> Vec<Part> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
}

fn extract_text(response: GenerateResponse) -> GenerationResult<String> {
    let text: String = first_parts(response)
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "no text in model reply".to_string(),
        ));
    }
    Ok(text)
}

fn extract_audio(response: GenerateResponse) -> GenerationResult<SpeechAudio> {
    let inline = first_parts(response)
        .into_iter()
        .find_map(|p| p.inline_data)
        .ok_or_else(|| GenerationError::InvalidResponse("no audio in model reply".to_string()))?;

    let data = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| GenerationError::InvalidResponse(format!("bad audio payload: {}", e)))?;

    Ok(SpeechAudio {
        mime_type: inline.mime_type,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates": [{"content": {"role": "model", "parts": [
            {"text": "{\"response\":"}, {"text": " \"hi\"}"}
        ]}, "finishReason": "STOP"}]}"#;
        assert_eq!(extract_text(parse(body)).unwrap(), "{\"response\": \"hi\"}");
    }

    #[test]
    fn test_extract_text_without_candidates_fails() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(
            extract_text(parse(body)),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_extract_audio_decodes_inline_data() {
        let body = r#"{"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAEC"}}
        ]}}]}"#;
        let audio = extract_audio(parse(body)).unwrap();
        assert_eq!(audio.mime_type, "audio/L16;codec=pcm;rate=24000");
        assert_eq!(audio.data, vec![0, 1, 2]);
    }
}
