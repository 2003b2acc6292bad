use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    AnalysisMode, Confidence, Finding, FindingStatus, NormalizedReport, ProviderAttempt,
    ProviderName, Recommendation, Severity, Symptoms, Urgency,
};

use super::diagnosis_parser::{RawDiagnosis, RawFinding, RawRecommendation};

const DEFAULT_FINDING_TERM: &str = "Pulmonary Finding";
const NO_RADIOLOGY_SUMMARY: &str = "No radiology summary provided.";
const NO_ABNORMALITIES: &str = "No significant abnormalities detected.";
const UNKNOWN_IMAGE_TYPE: &str = "unknown";

pub const NOT_MEDICAL_IMAGE_WARNING: &str =
    "The uploaded image may not be a medical X-ray. Analysis may be inaccurate.";

/// Maps a provider's diagnosis onto the report shape shared by every path.
pub fn normalize_diagnosis(
    raw: RawDiagnosis,
    provider: ProviderName,
    model: &str,
    symptoms: &Symptoms,
    attempts: Vec<ProviderAttempt>,
) -> NormalizedReport {
    let findings: Vec<Finding> = raw.critical_findings.iter().map(normalize_finding).collect();

    let recommendations: Vec<Recommendation> = raw
        .priority_recommendations
        .into_iter()
        .map(normalize_recommendation)
        .collect();

    let diagnosis = compose_diagnosis(
        raw.symptom_response.as_deref(),
        raw.overall_impression.as_deref(),
        raw.symptom_correlation.as_deref(),
        raw.patient_friendly_summary.as_deref(),
        &findings,
    );

    let overall_assessment = raw
        .overall_impression
        .clone()
        .unwrap_or_else(|| NO_ABNORMALITIES.to_string());

    let is_medical_image = raw.is_medical_image.unwrap_or(true);
    let image_type = raw
        .image_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_IMAGE_TYPE.to_string());
    let warnings = image_warnings(is_medical_image, &image_type);
    if !warnings.is_empty() {
        tracing::warn!(
            provider = %provider,
            is_medical_image,
            image_type = %image_type,
            "Provider doubts the upload is a chest X-ray"
        );
    }

    NormalizedReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        mode: AnalysisMode::Detailed,
        provider: provider.as_str().to_string(),
        model: Some(model.to_string()),
        is_medical_image,
        image_type,
        provided_symptoms: symptoms.as_str().to_string(),
        overall_assessment,
        warnings,
        patient_summary: raw.patient_friendly_summary,
        symptom_response: raw.symptom_response,
        symptom_correlation: raw.symptom_correlation,
        findings,
        recommendations,
        urgency: raw
            .urgency
            .as_deref()
            .map(Urgency::parse_lenient)
            .unwrap_or_default(),
        confidence: Confidence::from_reported(raw.confidence_score, Confidence::ZERO),
        diagnosis,
        attempts,
        processing_time_ms: 0,
    }
}

/// Caveats for an image the provider did not recognize as a chest X-ray.
/// An unreported image type raises nothing.
fn image_warnings(is_medical_image: bool, image_type: &str) -> Vec<String> {
    if !is_medical_image {
        return vec![NOT_MEDICAL_IMAGE_WARNING.to_string()];
    }
    if image_type == UNKNOWN_IMAGE_TYPE || is_chest_xray(image_type) {
        return Vec::new();
    }
    vec![format!(
        "The image was identified as '{image_type}', not a chest X-ray. Findings may not apply."
    )]
}

/// Accepts spellings like `chest_xray`, `Chest X-Ray (PA)` or `chest radiograph`.
pub fn is_chest_xray(image_type: &str) -> bool {
    let letters: String = image_type
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();
    (letters.contains("chest") && (letters.contains("xray") || letters.contains("radiograph")))
        || letters == "cxr"
}

fn normalize_finding(raw: &RawFinding) -> Finding {
    let status = raw
        .status
        .as_deref()
        .map(FindingStatus::parse_lenient)
        .unwrap_or(FindingStatus::Uncertain);

    let severity = match raw.severity.as_deref().map(Severity::parse_lenient) {
        Some(Severity::Unspecified) | None if status == FindingStatus::Absent => Severity::Normal,
        Some(severity) => severity,
        None => Severity::Unspecified,
    };

    Finding {
        term: raw
            .term
            .clone()
            .unwrap_or_else(|| DEFAULT_FINDING_TERM.to_string()),
        status,
        severity,
        confidence: Confidence::from_reported(raw.confidence, Confidence::NEUTRAL),
        description: raw
            .radiology_summary
            .clone()
            .unwrap_or_else(|| NO_RADIOLOGY_SUMMARY.to_string()),
        patient_explanation: raw.plain_language_summary.clone(),
    }
}

fn normalize_recommendation(raw: RawRecommendation) -> Recommendation {
    match raw {
        RawRecommendation::Text(text) => Recommendation::routine(text),
        RawRecommendation::Detailed(detail) => {
            let priority = detail
                .urgency
                .as_deref()
                .or(detail.priority.as_deref())
                .map(Urgency::parse_lenient)
                .unwrap_or_default();
            let rationale = detail
                .rationale
                .clone()
                .or_else(|| detail.text.clone())
                .or_else(|| detail.action.clone())
                .unwrap_or_else(|| "No recommendation details provided.".to_string());
            Recommendation {
                action: detail
                    .action
                    .unwrap_or_else(|| "Recommendation".to_string()),
                priority,
                rationale,
                timeline: detail
                    .timeline
                    .unwrap_or_else(|| Recommendation::DEFAULT_TIMELINE.to_string()),
            }
        }
    }
}

fn compose_diagnosis(
    symptom_response: Option<&str>,
    overall_impression: Option<&str>,
    symptom_correlation: Option<&str>,
    patient_summary: Option<&str>,
    findings: &[Finding],
) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(text) = symptom_response {
        sections.push(format!("Regarding Your Symptoms: {text}"));
    }
    if let Some(text) = overall_impression {
        sections.push(format!("Overall Impression: {text}"));
    }
    if let Some(text) = symptom_correlation {
        sections.push(format!("Symptom Correlation: {text}"));
    }
    if let Some(text) = patient_summary {
        sections.push(format!("Patient-Friendly Summary: {text}"));
    }

    if !findings.is_empty() {
        sections.push("Pulmonary Findings:".to_string());
        for finding in findings {
            sections.push(format!(
                "- {}: {} (Confidence {}%) - {}",
                finding.term,
                finding.status.title(),
                finding.confidence.as_percent(),
                finding.description
            ));
        }
    }

    if sections.is_empty() {
        NO_ABNORMALITIES.to_string()
    } else {
        sections.join("\n")
    }
}
