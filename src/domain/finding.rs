use serde::{Deserialize, Serialize};

use super::Confidence;

/// Pulmonary findings every provider is asked to report on.
pub const TRACKED_FINDINGS: [&str; 4] = [
    "Consolidation",
    "Air Bronchogram",
    "Pleural Effusion",
    "Infiltrate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Present,
    Absent,
    Uncertain,
}

impl FindingStatus {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "present" => FindingStatus::Present,
            "absent" => FindingStatus::Absent,
            _ => FindingStatus::Uncertain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Present => "present",
            FindingStatus::Absent => "absent",
            FindingStatus::Uncertain => "uncertain",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FindingStatus::Present => "Present",
            FindingStatus::Absent => "Absent",
            FindingStatus::Uncertain => "Uncertain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    #[serde(rename = "none")]
    Unspecified,
    Mild,
    Moderate,
    Severe,
    Urgent,
}

impl Severity {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "normal" => Severity::Normal,
            "mild" => Severity::Mild,
            "moderate" => Severity::Moderate,
            "severe" => Severity::Severe,
            "urgent" => Severity::Urgent,
            _ => Severity::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub term: String,
    pub status: FindingStatus,
    pub severity: Severity,
    pub confidence: Confidence,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_explanation: Option<String>,
}
