use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::application::ports::VisionProviderError;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

/// A provider's diagnosis as returned, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDiagnosis {
    #[serde(deserialize_with = "lenient_bool")]
    pub is_medical_image: Option<bool>,
    #[serde(deserialize_with = "lenient_text")]
    pub image_type: Option<String>,
    #[serde(alias = "findings", deserialize_with = "lenient_list")]
    pub critical_findings: Vec<RawFinding>,
    #[serde(deserialize_with = "lenient_text")]
    pub symptom_response: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub symptom_correlation: Option<String>,
    #[serde(alias = "diagnosis", deserialize_with = "lenient_text")]
    pub overall_impression: Option<String>,
    #[serde(alias = "plain_language_summary", deserialize_with = "lenient_text")]
    pub patient_friendly_summary: Option<String>,
    #[serde(alias = "recommendations", deserialize_with = "lenient_list")]
    pub priority_recommendations: Vec<RawRecommendation>,
    #[serde(deserialize_with = "lenient_number")]
    pub confidence_score: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub urgency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFinding {
    #[serde(deserialize_with = "lenient_text")]
    pub term: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(alias = "description", deserialize_with = "lenient_text")]
    pub radiology_summary: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub plain_language_summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRecommendation {
    Text(String),
    Detailed(RawRecommendationDetail),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecommendationDetail {
    #[serde(deserialize_with = "lenient_text")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub urgency: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rationale: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
    #[serde(alias = "follow_up_timeline", deserialize_with = "lenient_text")]
    pub timeline: Option<String>,
}

impl RawDiagnosis {
    pub fn has_content(&self) -> bool {
        !self.critical_findings.is_empty()
            || self
                .overall_impression
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Extracts the first JSON object in a model reply (markdown fences and chatter
/// around it are ignored) and checks it carries a usable diagnosis.
pub fn parse_diagnosis(reply: &str) -> Result<RawDiagnosis, VisionProviderError> {
    if reply.trim().is_empty() {
        return Err(VisionProviderError::EmptyResponse);
    }

    let object = JSON_OBJECT
        .find(reply)
        .ok_or_else(|| VisionProviderError::MalformedResponse("no JSON object found".to_string()))?;

    let value: Value = serde_json::from_str(object.as_str())
        .map_err(|e| VisionProviderError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(VisionProviderError::MalformedResponse(
            "top-level JSON is not an object".to_string(),
        ));
    }

    let diagnosis: RawDiagnosis = serde_json::from_value(value)
        .map_err(|e| VisionProviderError::MalformedResponse(format!("unexpected shape: {e}")))?;

    if !diagnosis.has_content() {
        return Err(VisionProviderError::MalformedResponse(
            "diagnosis carries no findings and no impression".to_string(),
        ));
    }

    Ok(diagnosis)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
