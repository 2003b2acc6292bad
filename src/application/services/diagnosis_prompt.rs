use serde_json::json;

use crate::domain::{Symptoms, TRACKED_FINDINGS};

const PREAMBLE: &str = "You are a JSON-generation AI. Your ONLY task is to generate valid JSON \
that follows the exact structure provided below. Do not add any explanations, markdown, or text \
outside the JSON.";

const INSTRUCTIONS: &str = "Analyze the chest X-ray image and fill in the JSON fields above. \
Report every listed finding with a status of present, absent or uncertain and a confidence \
between 0.0 and 1.0. The 'symptom_response' field is REQUIRED and must respond meaningfully to \
the reported symptoms. If the image is not a medical X-ray, set 'is_medical_image' to false; \
if it shows another body region, name it in 'image_type'.";

/// Builds the structured diagnosis prompt shared by every vision provider.
pub fn build_diagnosis_prompt(symptoms: &Symptoms) -> String {
    let symptoms_text = symptoms.for_prompt();

    let findings: Vec<serde_json::Value> = TRACKED_FINDINGS
        .iter()
        .map(|term| {
            json!({
                "term": term,
                "status": "present|absent|uncertain",
                "confidence": 0.0,
                "radiology_summary": "Describe what you see",
                "severity": "none|mild|moderate|severe"
            })
        })
        .collect();

    let skeleton = json!({
        "is_medical_image": true,
        "image_type": "chest_xray",
        "provided_symptoms": symptoms_text,
        "critical_findings": findings,
        "symptom_response": "Acknowledge the symptoms and explain what they might indicate medically.",
        "symptom_correlation": "Explain how the symptoms relate to your X-ray findings.",
        "overall_impression": "Your medical conclusion based on both image and symptoms.",
        "patient_friendly_summary": "Simple explanation for the patient.",
        "priority_recommendations": [
            {
                "action": "Recommended action",
                "urgency": "routine|urgent|emergency",
                "rationale": "Why this is needed"
            }
        ],
        "confidence_score": 0.0,
        "urgency": "routine|urgent|emergency"
    });

    let structure = serde_json::to_string_pretty(&skeleton).unwrap_or_else(|_| skeleton.to_string());

    format!(
        "{PREAMBLE}\n\nPATIENT SYMPTOMS: {symptoms_text}\n\n\
Generate a JSON object with this exact structure and these exact field names:\n\
{structure}\n\n{INSTRUCTIONS}"
    )
}
