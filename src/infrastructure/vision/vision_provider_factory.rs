use std::sync::Arc;

use reqwest::Client;

use crate::application::ports::VisionProvider;
use crate::domain::ProviderName;

use super::gemini_vision_provider::GeminiVisionProvider;
use super::openai_compatible_vision_provider::OpenAiCompatibleVisionProvider;

/// Connection details for one hosted vision model.
#[derive(Debug, Clone)]
pub struct VisionProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

pub struct VisionProviderFactory;

impl VisionProviderFactory {
    pub fn create(
        name: ProviderName,
        config: VisionProviderConfig,
        client: Client,
    ) -> Arc<dyn VisionProvider> {
        match name {
            ProviderName::OpenAi | ProviderName::Groq => {
                Arc::new(OpenAiCompatibleVisionProvider::new(name, config, client))
            }
            ProviderName::Gemini => Arc::new(GeminiVisionProvider::new(config, client)),
        }
    }

    /// Builds providers in the given order. `config_for` supplies each provider's settings.
    pub fn create_ordered<F>(
        order: &[ProviderName],
        client: &Client,
        mut config_for: F,
    ) -> Vec<Arc<dyn VisionProvider>>
    where
        F: FnMut(ProviderName) -> VisionProviderConfig,
    {
        order
            .iter()
            .map(|&name| {
                let config = config_for(name);
                if config.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                    tracing::warn!(provider = %name, "Vision provider has no api key, it will be skipped at request time");
                }
                Self::create(name, config, client.clone())
            })
            .collect()
    }
}
