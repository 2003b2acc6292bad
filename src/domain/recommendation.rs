use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Routine,
    Urgent,
    Emergency,
}

impl Urgency {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "urgent" | "high" => Urgency::Urgent,
            "emergency" | "critical" => Urgency::Emergency,
            _ => Urgency::Routine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Routine => "routine",
            Urgency::Urgent => "urgent",
            Urgency::Emergency => "emergency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub priority: Urgency,
    pub rationale: String,
    pub timeline: String,
}

impl Recommendation {
    pub const DEFAULT_TIMELINE: &'static str = "As needed";

    pub fn routine(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            action: text.clone(),
            priority: Urgency::Routine,
            rationale: text,
            timeline: Self::DEFAULT_TIMELINE.to_string(),
        }
    }
}
