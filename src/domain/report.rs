use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AnalysisMode, Confidence, Finding, ProviderName, Recommendation, Urgency};

/// Provider label stamped on reports produced by the local classifier.
pub const LOCAL_CLASSIFIER_PROVIDER: &str = "local_classifier";

/// Outcome of calling one provider while routing a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    pub provider: ProviderName,
    pub model: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl ProviderAttempt {
    pub fn succeeded(provider: ProviderName, model: &str, elapsed_ms: u64) -> Self {
        Self {
            provider,
            model: model.to_string(),
            success: true,
            error: None,
            elapsed_ms,
        }
    }

    pub fn failed(provider: ProviderName, model: &str, error: String, elapsed_ms: u64) -> Self {
        Self {
            provider,
            model: model.to_string(),
            success: false,
            error: Some(error),
            elapsed_ms,
        }
    }
}

/// The single report shape returned to callers, whichever path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: AnalysisMode,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub is_medical_image: bool,
    pub image_type: String,
    pub provided_symptoms: String,
    pub overall_assessment: String,
    /// Caveats about the input, e.g. an image that is not a chest X-ray.
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_correlation: Option<String>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub urgency: Urgency,
    pub confidence: Confidence,
    pub diagnosis: String,
    pub attempts: Vec<ProviderAttempt>,
    pub processing_time_ms: u64,
}
