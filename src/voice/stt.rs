//! Speech-to-text (STT) processing

use async_trait::async_trait;

use crate::voice::Transcriber;
use crate::{Error, Result};

/// Response from the Whisper transcription API
#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Transcribes WAV audio via OpenAI Whisper
pub struct SpeechToText {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl SpeechToText {
    /// Create a new STT instance
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for transcription".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Transcriber for SpeechToText {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("audio.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", self.model.clone());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "transcription request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Whisper API error");
            return Err(Error::Stt(format!("Whisper API error {status}: {body}")));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse transcription response");
            e
        })?;

        tracing::info!(transcript = %result.text, "transcription complete");
        Ok(result.text)
    }
}
