use crate::error::{GenerationError, GenerationResult};
use crate::flows::backend::{require_text, GenerationBackend, SpeechAudio};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_SAMPLE_RATE: u32 = 24_000;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechOutput {
    /// `data:<mime>;base64,<payload>`
    pub audio_data_uri: String,
}

/// Read `text` aloud and return the audio as a data URI.
pub async fn text_to_speech(
    backend: &dyn GenerationBackend,
    input: &SpeechInput,
) -> GenerationResult<SpeechOutput> {
    require_text("text", &input.text)?;

    let audio = backend.synthesize_speech(&input.text).await?;
    if audio.data.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "textToSpeech flow: no audio returned".to_string(),
        ));
    }
    debug!("Received {} bytes of {}", audio.data.len(), audio.mime_type);

    Ok(SpeechOutput {
        audio_data_uri: to_data_uri(audio),
    })
}

fn to_data_uri(audio: SpeechAudio) -> String {
    let (mime, bytes) = match pcm_sample_rate(&audio.mime_type) {
        Some(rate) => ("audio/wav".to_string(), wav_from_pcm(&audio.data, rate)),
        None => (audio.mime_type, audio.data),
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Sample rate of a raw PCM mime type such as `audio/L16;codec=pcm;rate=24000`.
fn pcm_sample_rate(mime: &str) -> Option<u32> {
    let mut parts = mime.split(';').map(str::trim);
    let base = parts.next()?.to_ascii_lowercase();
    if base != "audio/l16" && base != "audio/pcm" {
        return None;
    }
    let rate = parts
        .filter_map(|p| p.strip_prefix("rate="))
        .find_map(|r| r.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_RATE);
    Some(rate)
}

/// Wrap 16-bit mono little-endian PCM in a RIFF/WAVE container.
fn wav_from_pcm(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::backend::MockGenerationBackend;

    #[test]
    fn test_pcm_sample_rate() {
        assert_eq!(pcm_sample_rate("audio/L16;codec=pcm;rate=24000"), Some(24_000));
        assert_eq!(pcm_sample_rate("audio/pcm"), Some(DEFAULT_SAMPLE_RATE));
        assert_eq!(pcm_sample_rate("audio/mpeg"), None);
    }

    #[test]
    fn test_wav_header() {
        let wav = wav_from_pcm(&[1, 2, 3, 4], 24_000);
        assert_eq!(wav.len(), 48);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 40);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 24_000);
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 4);
    }

    #[tokio::test]
    async fn test_pcm_reply_becomes_wav_data_uri() {
        let mut backend = MockGenerationBackend::new();
        backend.expect_synthesize_speech().times(1).returning(|_| {
            Ok(SpeechAudio {
                mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
                data: vec![0, 0, 1, 0],
            })
        });

        let input = SpeechInput {
            text: "Your rent is due".to_string(),
        };
        let output = text_to_speech(&backend, &input).await.unwrap();
        let payload = output
            .audio_data_uri
            .strip_prefix("data:audio/wav;base64,")
            .unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[44..], &[0, 0, 1, 0]);
    }

    #[tokio::test]
    async fn test_encoded_audio_passes_through() {
        let mut backend = MockGenerationBackend::new();
        backend.expect_synthesize_speech().returning(|_| {
            Ok(SpeechAudio {
                mime_type: "audio/mpeg".to_string(),
                data: b"ID3".to_vec(),
            })
        });

        let input = SpeechInput {
            text: "hi".to_string(),
        };
        let output = text_to_speech(&backend, &input).await.unwrap();
        assert_eq!(output.audio_data_uri, "data:audio/mpeg;base64,SUQz");
    }

    #[tokio::test]
    async fn test_empty_audio_is_invalid() {
        let mut backend = MockGenerationBackend::new();
        backend.expect_synthesize_speech().returning(|_| {
            Ok(SpeechAudio {
                mime_type: "audio/mpeg".to_string(),
                data: Vec::new(),
            })
        });

        let input = SpeechInput {
            text: "hi".to_string(),
        };
        assert!(matches!(
            text_to_speech(&backend, &input).await,
            Err(GenerationError::InvalidResponse(_))
        ));
    }
}
