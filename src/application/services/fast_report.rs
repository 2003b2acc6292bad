use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    AnalysisMode, ClassLabel, Classification, Finding, FindingStatus,
    LOCAL_CLASSIFIER_PROVIDER, NormalizedReport, Recommendation, Severity, Symptoms, Urgency,
};

/// Above this confidence a pneumonia prediction is flagged urgent.
pub const URGENT_CONFIDENCE: f64 = 0.8;

/// Turns a local classifier prediction into the shared report shape.
pub fn build_fast_report(
    classification: &Classification,
    symptoms: &Symptoms,
    model: &str,
) -> NormalizedReport {
    let confidence = classification.confidence;

    let (assessment, finding, urgency, recommendations) = match classification.label {
        ClassLabel::Pneumonia => {
            let urgent = confidence.value() > URGENT_CONFIDENCE;
            (
                format!("PNEUMONIA DETECTED with {confidence} confidence"),
                Finding {
                    term: "Pneumonia".to_string(),
                    status: FindingStatus::Present,
                    severity: if urgent {
                        Severity::Urgent
                    } else {
                        Severity::Moderate
                    },
                    confidence,
                    description: format!(
                        "Evidence of pneumonia detected in chest X-ray with {confidence} confidence."
                    ),
                    patient_explanation: None,
                },
                if urgent {
                    Urgency::Urgent
                } else {
                    Urgency::Routine
                },
                vec![
                    Recommendation::routine("Clinical correlation recommended"),
                    Recommendation::routine("Consider follow-up imaging if symptoms persist"),
                ],
            )
        }
        ClassLabel::Normal => (
            format!("NO EVIDENCE OF PNEUMONIA (confidence: {confidence})"),
            Finding {
                term: "Pneumonia".to_string(),
                status: FindingStatus::Absent,
                severity: Severity::Normal,
                confidence,
                description: format!(
                    "No evidence of pneumonia detected. {confidence} confidence in normal assessment."
                ),
                patient_explanation: None,
            },
            Urgency::Routine,
            vec![
                Recommendation::routine("No immediate follow-up required"),
                Recommendation::routine("Continue routine monitoring"),
            ],
        ),
    };

    let diagnosis = format!(
        "{assessment}\nPneumonia probability: {}\nNormal probability: {}",
        classification.pneumonia_probability, classification.normal_probability
    );

    NormalizedReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        mode: AnalysisMode::Fast,
        provider: LOCAL_CLASSIFIER_PROVIDER.to_string(),
        model: Some(model.to_string()),
        is_medical_image: true,
        image_type: "chest_xray".to_string(),
        provided_symptoms: symptoms.as_str().to_string(),
        overall_assessment: assessment,
        warnings: Vec::new(),
        patient_summary: None,
        symptom_response: None,
        symptom_correlation: None,
        findings: vec![finding],
        recommendations,
        urgency,
        confidence,
        diagnosis,
        attempts: Vec::new(),
        processing_time_ms: 0,
    }
}
