use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{PreparedImage, VisionProvider, VisionProviderError};
use crate::domain::ProviderName;

use super::VisionProviderConfig;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_VISION_MODEL: &str = "gemini-2.5-flash";

const TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 4096;

pub struct GeminiVisionProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiVisionProvider {
    pub fn new(config: VisionProviderConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[async_trait]
impl VisionProvider for GeminiVisionProvider {
    fn name(&self) -> ProviderName {
        ProviderName::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, image, prompt), fields(provider = "gemini", model = %self.model))]
    async fn describe(
        &self,
        image: &PreparedImage,
        prompt: &str,
    ) -> Result<String, VisionProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VisionProviderError::MissingApiKey(ProviderName::Gemini))?;

        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt },
                        {
                            "inline_data": {
                                "mime_type": "image/jpeg",
                                "data": image.base64_jpeg
                            }
                        }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "responseMimeType": "application/json"
            }
        });

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionProviderError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionProviderError::UnexpectedStatus { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            VisionProviderError::MalformedResponse(format!("generateContent: {e}"))
        })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(VisionProviderError::Refused(format!("prompt blocked: {reason}")));
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(VisionProviderError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(VisionProviderError::ContentFiltered);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(VisionProviderError::EmptyResponse);
        }

        tracing::debug!(chars = text.len(), "Vision reply received");
        Ok(text)
    }
}
