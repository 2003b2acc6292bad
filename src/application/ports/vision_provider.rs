use async_trait::async_trait;

use crate::domain::ProviderName;

/// An image ready to send to a hosted model: RGB JPEG, base64-encoded.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub base64_jpeg: String,
    pub width: u32,
    pub height: u32,
}

impl PreparedImage {
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64_jpeg)
    }
}

/// A hosted vision-language model. Returns the model's raw text reply.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    fn name(&self) -> ProviderName;

    fn model(&self) -> &str;

    async fn describe(
        &self,
        image: &PreparedImage,
        prompt: &str,
    ) -> Result<String, VisionProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisionProviderError {
    #[error("api key not configured for {0}")]
    MissingApiKey(ProviderName),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("provider returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("provider refused to analyze: {0}")]
    Refused(String),
    #[error("response blocked by content filter")]
    ContentFiltered,
    #[error("empty response")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
