use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which analysis path serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Local pretrained classifier, no network calls.
    Fast,
    /// Vision-language model call chain across external providers.
    #[default]
    Detailed,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Fast => "fast",
            AnalysisMode::Detailed => "detailed",
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(AnalysisMode::Fast),
            "" | "detailed" => Ok(AnalysisMode::Detailed),
            other => Err(format!(
                "Invalid analysis mode: {}. Expected: fast or detailed",
                other
            )),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
