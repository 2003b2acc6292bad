use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{ClassifierError, ClassifierStatus, ImageClassifier};
use crate::domain::{AnalysisMode, AnalysisRequest, NormalizedReport, UploadError, UploadPolicy};

use super::fast_report::build_fast_report;
use super::report_cache::{CacheKey, ReportCache};
use super::vision_router::{RoutingError, VisionRouter};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Entry point for an uploaded X-ray: validates, then runs the requested mode.
pub struct AnalysisService {
    router: Arc<VisionRouter>,
    classifier: Arc<dyn ImageClassifier>,
    classifier_model: String,
    policy: UploadPolicy,
    cache: Option<ReportCache>,
}

impl AnalysisService {
    pub fn new(
        router: Arc<VisionRouter>,
        classifier: Arc<dyn ImageClassifier>,
        classifier_model: impl Into<String>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            router,
            classifier,
            classifier_model: classifier_model.into(),
            policy,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: ReportCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn router(&self) -> &VisionRouter {
        &self.router
    }

    pub fn classifier_status(&self) -> ClassifierStatus {
        self.classifier.status()
    }

    #[tracing::instrument(
        skip(self, request),
        fields(filename = %request.filename, mode = %request.mode, image_bytes = request.image.len())
    )]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<NormalizedReport, AnalysisError> {
        let started = Instant::now();
        self.policy.validate(&request.filename, request.image.len())?;

        let key = CacheKey::for_request(&request);

        if let Some(cache) = &self.cache {
            if let Some(report) = cache.get(&key).await {
                tracing::debug!(report_id = %report.report_id, "Serving cached report");
                return Ok(report);
            }
        }

        let mut report = match request.mode {
            AnalysisMode::Fast => {
                let classification = self.classifier.classify(&request.image).await?;
                tracing::info!(
                    label = %classification.label,
                    confidence = classification.confidence.value(),
                    "Local classification complete"
                );
                build_fast_report(&classification, &request.symptoms, &self.classifier_model)
            }
            AnalysisMode::Detailed => self.router.analyze(request.image, &request.symptoms).await?,
        };

        report.processing_time_ms = started.elapsed().as_millis() as u64;

        if let Some(cache) = &self.cache {
            cache.insert(key, report.clone()).await;
        }

        tracing::info!(
            report_id = %report.report_id,
            provider = %report.provider,
            processing_time_ms = report.processing_time_ms,
            "Analysis complete"
        );
        Ok(report)
    }
}
