use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{ClassifierError, ClassifierStatus, ImageClassifier};
use crate::domain::Classification;

pub type ClassifierLoader =
    Arc<dyn Fn() -> Result<Arc<dyn ImageClassifier>, ClassifierError> + Send + Sync>;

/// Loads the wrapped classifier on first use, exactly once per process.
///
/// A failed load is remembered: later calls get `ModelNotReady` with the
/// original error text instead of another load attempt.
pub struct LazyClassifier {
    loader: ClassifierLoader,
    cell: OnceCell<Result<Arc<dyn ImageClassifier>, String>>,
}

impl LazyClassifier {
    pub fn new(loader: ClassifierLoader) -> Self {
        Self {
            loader,
            cell: OnceCell::new(),
        }
    }

    /// Runs the loader unless a previous call already did.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn ImageClassifier>, ClassifierError> {
        let loaded = self
            .cell
            .get_or_init(|| async {
                let loader = Arc::clone(&self.loader);
                let outcome = tokio::task::spawn_blocking(move || loader())
                    .await
                    .map_err(|e| ClassifierError::ModelLoadFailed(format!("task join error: {e}")))
                    .and_then(|result| result);

                match outcome {
                    Ok(classifier) => {
                        tracing::info!("Classifier ready");
                        Ok(classifier)
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Classifier failed to load");
                        Err(e.to_string())
                    }
                }
            })
            .await;

        match loaded {
            Ok(classifier) => Ok(Arc::clone(classifier)),
            Err(reason) => Err(ClassifierError::ModelNotReady(reason.clone())),
        }
    }
}

#[async_trait]
impl ImageClassifier for LazyClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Classification, ClassifierError> {
        let classifier = self.ensure_loaded().await?;
        classifier.classify(image).await
    }

    fn status(&self) -> ClassifierStatus {
        match self.cell.get() {
            None => ClassifierStatus::NotLoaded,
            Some(Ok(_)) => ClassifierStatus::Ready,
            Some(Err(reason)) => ClassifierStatus::Failed(reason.clone()),
        }
    }
}
