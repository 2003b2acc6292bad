use pulmoscan::application::services::{
    NOT_MEDICAL_IMAGE_WARNING, is_chest_xray, normalize_diagnosis, parse_diagnosis,
};
use pulmoscan::domain::{
    AnalysisMode, FindingStatus, ProviderAttempt, ProviderName, Severity, Symptoms, Urgency,
};

fn normalize(reply: &str) -> pulmoscan::domain::NormalizedReport {
    let raw = parse_diagnosis(reply).unwrap();
    normalize_diagnosis(
        raw,
        ProviderName::OpenAi,
        "gpt-4o-mini",
        &Symptoms::new("dry cough"),
        vec![ProviderAttempt::succeeded(ProviderName::OpenAi, "gpt-4o-mini", 12)],
    )
}

#[test]
fn given_percentage_confidences_when_normalizing_then_scales_to_unit_range() {
    let report = normalize(
        r#"{
            "overall_impression": "ok",
            "confidence_score": 85,
            "critical_findings": [{"term": "Consolidation", "status": "present", "confidence": 70}]
        }"#,
    );

    assert!((report.confidence.value() - 0.85).abs() < 1e-9);
    assert!((report.findings[0].confidence.value() - 0.70).abs() < 1e-9);
}

#[test]
fn given_out_of_range_or_missing_confidence_when_normalizing_then_clamps_and_defaults() {
    let report = normalize(
        r#"{
            "overall_impression": "ok",
            "critical_findings": [
                {"term": "Consolidation", "confidence": 250},
                {"term": "Infiltrate", "confidence": -3},
                {"term": "Air Bronchogram"}
            ]
        }"#,
    );

    assert_eq!(report.confidence.value(), 0.0);
    assert_eq!(report.findings[0].confidence.value(), 1.0);
    assert_eq!(report.findings[1].confidence.value(), 0.0);
    assert_eq!(report.findings[2].confidence.value(), 0.5);
}

#[test]
fn given_absent_finding_with_none_severity_when_normalizing_then_severity_is_normal() {
    let report = normalize(
        r#"{"critical_findings": [
            {"term": "Pleural Effusion", "status": "absent", "severity": "none"},
            {"term": "Infiltrate", "status": "present", "severity": "none"},
            {"term": "Consolidation", "status": "maybe", "severity": "mild"}
        ]}"#,
    );

    assert_eq!(report.findings[0].severity, Severity::Normal);
    assert_eq!(report.findings[1].severity, Severity::Unspecified);
    assert_eq!(report.findings[2].status, FindingStatus::Uncertain);
    assert_eq!(report.findings[2].severity, Severity::Mild);
}

#[test]
fn given_mixed_recommendations_when_normalizing_then_maps_strings_and_objects() {
    let report = normalize(
        r#"{
            "overall_impression": "ok",
            "priority_recommendations": [
                "Rest at home",
                {"action": "Get a CT scan", "priority": "critical", "text": "Rule out abscess", "timeline": "Today"},
                {"action": "Recheck"}
            ]
        }"#,
    );

    let recs = &report.recommendations;
    assert_eq!(recs[0].action, "Rest at home");
    assert_eq!(recs[0].priority, Urgency::Routine);
    assert_eq!(recs[0].timeline, "As needed");
    assert_eq!(recs[1].priority, Urgency::Emergency);
    assert_eq!(recs[1].rationale, "Rule out abscess");
    assert_eq!(recs[1].timeline, "Today");
    assert_eq!(recs[2].rationale, "Recheck");
}

#[test]
fn given_full_diagnosis_when_normalizing_then_stamps_provider_and_composes_narrative() {
    let report = normalize(
        r#"{
            "symptom_response": "A dry cough is common.",
            "overall_impression": "No acute disease.",
            "critical_findings": [{"term": "Consolidation", "status": "absent", "confidence": 0.9, "radiology_summary": "Clear"}],
            "urgency": "routine"
        }"#,
    );

    assert_eq!(report.mode, AnalysisMode::Detailed);
    assert_eq!(report.provider, "openai");
    assert_eq!(report.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(report.provided_symptoms, "dry cough");
    assert_eq!(report.overall_assessment, "No acute disease.");
    assert!(report.diagnosis.starts_with("Regarding Your Symptoms: A dry cough is common."));
    assert!(report.diagnosis.contains("- Consolidation: Absent (Confidence 90%) - Clear"));
    assert_eq!(report.attempts.len(), 1);
}

#[test]
fn given_non_medical_image_when_normalizing_then_report_carries_warning() {
    let report = normalize(
        r#"{
            "is_medical_image": false,
            "image_type": "photograph",
            "overall_impression": "This appears to be a photo of a cat."
        }"#,
    );

    assert!(!report.is_medical_image);
    assert_eq!(report.warnings, vec![NOT_MEDICAL_IMAGE_WARNING.to_string()]);
}

#[test]
fn given_other_body_region_when_normalizing_then_warns_about_image_type() {
    let report = normalize(
        r#"{
            "is_medical_image": true,
            "image_type": "knee_xray",
            "overall_impression": "No fracture seen."
        }"#,
    );

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("knee_xray"));
}

#[test]
fn given_chest_xray_or_unreported_type_when_normalizing_then_has_no_warnings() {
    let chest = normalize(
        r#"{"is_medical_image": true, "image_type": "Chest X-Ray (PA)", "overall_impression": "ok"}"#,
    );
    let unreported = normalize(r#"{"overall_impression": "ok"}"#);

    assert!(chest.warnings.is_empty());
    assert!(unreported.warnings.is_empty());
    assert_eq!(unreported.image_type, "unknown");
}

#[test]
fn given_image_type_spellings_when_checking_chest_xray_then_matches_chest_only() {
    assert!(is_chest_xray("chest_xray"));
    assert!(is_chest_xray("chest radiograph"));
    assert!(is_chest_xray("CXR"));
    assert!(!is_chest_xray("hand_xray"));
    assert!(!is_chest_xray("ct_scan"));
}
