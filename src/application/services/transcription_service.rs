use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{AudioClip, AudioProbe, TranscriptionEngine};
use crate::domain::{Transcript, UploadError, UploadPolicy};

use super::symptom_extractor::extract_symptoms;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("audio file is empty")]
    EmptyAudio,
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("no transcription providers configured")]
    NoProvidersConfigured,
    #[error("all transcription providers failed, last error: {last_error}")]
    AllProvidersFailed { last_error: String },
}

/// Sends a clip to speech-to-text engines in order until one returns text.
pub struct TranscriptionService {
    engines: Vec<Arc<dyn TranscriptionEngine>>,
    probe: Arc<dyn AudioProbe>,
    policy: UploadPolicy,
}

impl TranscriptionService {
    pub fn new(
        engines: Vec<Arc<dyn TranscriptionEngine>>,
        probe: Arc<dyn AudioProbe>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            engines,
            probe,
            policy,
        }
    }

    pub fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.name().to_string()).collect()
    }

    #[tracing::instrument(skip(self, audio), fields(filename = %audio.filename, audio_bytes = audio.data.len()))]
    pub async fn transcribe(
        &self,
        audio: AudioClip,
    ) -> Result<Transcript, TranscriptionServiceError> {
        if audio.data.is_empty() {
            return Err(TranscriptionServiceError::EmptyAudio);
        }
        self.policy.validate(&audio.filename, audio.data.len())?;

        if self.engines.is_empty() {
            return Err(TranscriptionServiceError::NoProvidersConfigured);
        }

        let duration_secs = self.probe.duration_secs(&audio).unwrap_or(0.0);
        let mut last_error = String::from("no provider attempted");

        for engine in &self.engines {
            let started = Instant::now();
            match engine.transcribe(&audio).await {
                Ok(text) if !text.trim().is_empty() => {
                    let text = text.trim().to_string();
                    tracing::info!(
                        provider = engine.name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        chars = text.len(),
                        "Transcription succeeded"
                    );
                    let symptoms = extract_symptoms(&text);
                    return Ok(Transcript {
                        text,
                        symptoms,
                        duration_secs,
                        provider: engine.name().to_string(),
                    });
                }
                Ok(_) => {
                    tracing::warn!(provider = engine.name(), "Transcription returned no text");
                    last_error = format!("{}: empty transcription", engine.name());
                }
                Err(e) => {
                    tracing::warn!(
                        provider = engine.name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "Transcription provider failed, trying next provider"
                    );
                    last_error = format!("{}: {e}", engine.name());
                }
            }
        }

        tracing::error!(last_error = %last_error, "All transcription providers failed");
        Err(TranscriptionServiceError::AllProvidersFailed { last_error })
    }
}
