use std::sync::Arc;

use reqwest::Client;

use crate::application::ports::TranscriptionEngine;
use crate::domain::ProviderName;

use super::openai_whisper_engine::OpenAiWhisperEngine;

/// Connection details for one hosted speech-to-text model.
#[derive(Debug, Clone)]
pub struct TranscriptionEngineConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Returns `None` for providers that offer no speech-to-text API.
    pub fn create(
        provider: ProviderName,
        config: TranscriptionEngineConfig,
        client: Client,
    ) -> Option<Arc<dyn TranscriptionEngine>> {
        match provider {
            ProviderName::OpenAi | ProviderName::Groq => {
                let name = format!("{}-whisper", provider.as_str());
                Some(Arc::new(OpenAiWhisperEngine::new(
                    name,
                    config.api_key,
                    &config.base_url,
                    &config.model,
                    client,
                )))
            }
            ProviderName::Gemini => {
                tracing::warn!(provider = %provider, "No transcription engine for provider, skipping");
                None
            }
        }
    }

    pub fn create_ordered<F>(
        order: &[ProviderName],
        client: &Client,
        mut config_for: F,
    ) -> Vec<Arc<dyn TranscriptionEngine>>
    where
        F: FnMut(ProviderName) -> TranscriptionEngineConfig,
    {
        order
            .iter()
            .filter_map(|&provider| Self::create(provider, config_for(provider), client.clone()))
            .collect()
    }
}
