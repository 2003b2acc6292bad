use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;

use crate::application::ports::{PreparedImage, VisionProvider, VisionProviderError};
use crate::domain::{NormalizedReport, ProviderAttempt, ProviderName, Symptoms};

use super::diagnosis_parser::{RawDiagnosis, parse_diagnosis};
use super::diagnosis_prompt::build_diagnosis_prompt;
use super::image_preparation::{ImagePreparationError, prepare_image_blocking};
use super::report_normalizer::normalize_diagnosis;

/// Calls vision providers in priority order until one yields a usable diagnosis.
pub struct VisionRouter {
    providers: Vec<Arc<dyn VisionProvider>>,
}

/// The winning provider's diagnosis plus the trail of attempts behind it.
#[derive(Debug, Clone)]
pub struct RoutedDiagnosis {
    pub provider: ProviderName,
    pub model: String,
    pub diagnosis: RawDiagnosis,
    pub attempts: Vec<ProviderAttempt>,
}

#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("no vision providers configured")]
    NoProvidersConfigured,
    #[error("all vision providers failed: {}", summarize_attempts(.attempts))]
    AllProvidersFailed { attempts: Vec<ProviderAttempt> },
    #[error(transparent)]
    ImagePreparation(#[from] ImagePreparationError),
}

impl VisionRouter {
    pub fn new(providers: Vec<Arc<dyn VisionProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<ProviderName> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Prepares the image once, routes it and normalizes the winning reply.
    #[tracing::instrument(skip(self, image, symptoms), fields(image_bytes = image.len()))]
    pub async fn analyze(
        &self,
        image: Bytes,
        symptoms: &Symptoms,
    ) -> Result<NormalizedReport, RoutingError> {
        if self.providers.is_empty() {
            return Err(RoutingError::NoProvidersConfigured);
        }

        let prepared = prepare_image_blocking(image).await?;
        tracing::debug!(
            width = prepared.width,
            height = prepared.height,
            encoded_chars = prepared.base64_jpeg.len(),
            "Image prepared for vision providers"
        );

        let routed = self.route(&prepared, symptoms).await?;

        Ok(normalize_diagnosis(
            routed.diagnosis,
            routed.provider,
            &routed.model,
            symptoms,
            routed.attempts,
        ))
    }

    pub async fn route(
        &self,
        image: &PreparedImage,
        symptoms: &Symptoms,
    ) -> Result<RoutedDiagnosis, RoutingError> {
        if self.providers.is_empty() {
            return Err(RoutingError::NoProvidersConfigured);
        }

        let prompt = build_diagnosis_prompt(symptoms);
        let mut attempts: Vec<ProviderAttempt> = Vec::with_capacity(self.providers.len());

        let order = self
            .provider_names()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");

        tracing::info!(
            order = %order,
            has_symptoms = !symptoms.is_empty(),
            "Starting vision analysis"
        );

        for provider in &self.providers {
            let name = provider.name();
            let model = provider.model().to_string();
            let started = Instant::now();

            let outcome = match provider.describe(image, &prompt).await {
                Ok(reply) => parse_diagnosis(&reply),
                Err(e) => Err(e),
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(diagnosis) => {
                    tracing::info!(
                        provider = %name,
                        model = %model,
                        elapsed_ms,
                        findings = diagnosis.critical_findings.len(),
                        "Vision provider succeeded"
                    );
                    attempts.push(ProviderAttempt::succeeded(name, &model, elapsed_ms));
                    return Ok(RoutedDiagnosis {
                        provider: name,
                        model,
                        diagnosis,
                        attempts,
                    });
                }
                Err(e) => {
                    log_failure(name, &model, elapsed_ms, &e);
                    attempts.push(ProviderAttempt::failed(name, &model, e.to_string(), elapsed_ms));
                }
            }
        }

        tracing::error!(attempted = attempts.len(), "All vision providers failed");
        Err(RoutingError::AllProvidersFailed { attempts })
    }
}

fn log_failure(name: ProviderName, model: &str, elapsed_ms: u64, error: &VisionProviderError) {
    match error {
        VisionProviderError::MissingApiKey(_) => {
            tracing::warn!(provider = %name, "Vision provider skipped: api key not configured")
        }
        _ => tracing::warn!(
            provider = %name,
            model = %model,
            elapsed_ms,
            error = %error,
            "Vision provider failed, trying next provider"
        ),
    }
}

fn summarize_attempts(attempts: &[ProviderAttempt]) -> String {
    attempts
        .iter()
        .map(|a| {
            format!(
                "{}: {}",
                a.provider,
                a.error.as_deref().unwrap_or("no usable response")
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
