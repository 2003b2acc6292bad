use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{PreparedImage, VisionProvider, VisionProviderError};
use crate::domain::ProviderName;

use super::VisionProviderConfig;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_VISION_MODEL: &str = "gpt-4o-mini";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 4096;

const SYSTEM_PROMPT: &str = "You are a radiology assistant that reviews chest X-rays for an \
educational screening tool. Answer only with the requested JSON object.";

const REFUSAL_PHRASES: [&str; 5] = [
    "unable to provide",
    "cannot analyze",
    "not a medical professional",
    "consult a healthcare",
    "medical advice",
];

/// Chat-completions vision adapter. Serves OpenAI and any compatible host such as Groq.
pub struct OpenAiCompatibleVisionProvider {
    client: Client,
    name: ProviderName,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleVisionProvider {
    pub fn new(name: ProviderName, config: VisionProviderConfig, client: Client) -> Self {
        Self {
            client,
            name,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[async_trait]
impl VisionProvider for OpenAiCompatibleVisionProvider {
    fn name(&self) -> ProviderName {
        self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, image, prompt), fields(provider = %self.name, model = %self.model))]
    async fn describe(
        &self,
        image: &PreparedImage,
        prompt: &str,
    ) -> Result<String, VisionProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VisionProviderError::MissingApiKey(self.name))?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        {
                            "type": "image_url",
                            "image_url": { "url": image.data_uri(), "detail": "high" }
                        }
                    ]
                }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE
        });

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionProviderError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionProviderError::UnexpectedStatus { status, body });
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| VisionProviderError::ApiRequestFailed(format!("body: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse chat completion JSON"
            );
            VisionProviderError::MalformedResponse(format!("chat completion: {e}"))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(VisionProviderError::EmptyResponse)?;

        if let Some(refusal) = choice.message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(VisionProviderError::Refused(refusal));
        }

        match choice.finish_reason.as_deref() {
            Some("content_filter") => return Err(VisionProviderError::ContentFiltered),
            Some("length") => tracing::warn!("Vision reply truncated at max_tokens"),
            _ => {}
        }

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(VisionProviderError::EmptyResponse)?;

        if let Some(phrase) = refusal_phrase(&content) {
            return Err(VisionProviderError::Refused(format!(
                "reply contains refusal phrase '{phrase}'"
            )));
        }

        tracing::debug!(chars = content.len(), "Vision reply received");
        Ok(content)
    }
}

/// Only prose replies are scanned; a JSON report may legitimately advise seeing a doctor.
fn refusal_phrase(content: &str) -> Option<&'static str> {
    if content.contains('{') {
        return None;
    }
    let lowered = content.to_lowercase();
    REFUSAL_PHRASES
        .iter()
        .copied()
        .find(|phrase| lowered.contains(phrase))
}
