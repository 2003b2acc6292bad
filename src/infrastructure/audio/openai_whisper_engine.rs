use async_trait::async_trait;
use reqwest::{Client, multipart};

use crate::application::ports::{AudioClip, TranscriptionEngine, TranscriptionError};

pub const OPENAI_WHISPER_MODEL: &str = "whisper-1";
pub const GROQ_WHISPER_MODEL: &str = "whisper-large-v3";

const LANGUAGE: &str = "en";

/// Whisper over the OpenAI `/audio/transcriptions` API. Groq serves the same endpoint.
pub struct OpenAiWhisperEngine {
    client: Client,
    name: String,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(
        name: impl Into<String>,
        api_key: Option<String>,
        base_url: &str,
        model: &str,
        client: Client,
    ) -> Self {
        Self {
            client,
            name: name.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self, audio), fields(engine = %self.name, model = %self.model))]
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TranscriptionError::MissingApiKey(self.name.clone()))?;

        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio.data.to_vec())
            .file_name(audio.filename.clone())
            .mime_str(&audio.mime_type)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text("language", LANGUAGE)
            .part("file", file_part);

        tracing::debug!(bytes = audio.data.len(), "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(chars = transcript.len(), "Whisper transcription completed");

        Ok(transcript.trim().to_string())
    }
}
