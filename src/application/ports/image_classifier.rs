use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Classification;

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Classification, ClassifierError>;

    fn status(&self) -> ClassifierStatus {
        ClassifierStatus::Ready
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum ClassifierStatus {
    NotLoaded,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("model not ready: {0}")]
    ModelNotReady(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
