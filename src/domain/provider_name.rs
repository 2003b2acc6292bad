use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// External hosted AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Groq,
}

impl ProviderName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::OpenAi => "openai",
            ProviderName::Gemini => "gemini",
            ProviderName::Groq => "groq",
        }
    }

    /// Parses a comma-separated priority list. Unknown names are skipped with a
    /// warning and duplicates keep their first position.
    pub fn parse_order(list: &str) -> Vec<ProviderName> {
        let mut order = Vec::new();
        for raw in list.split(',') {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            match name.parse::<ProviderName>() {
                Ok(provider) if !order.contains(&provider) => order.push(provider),
                Ok(_) => {}
                Err(e) => tracing::warn!(provider = %name, error = %e, "Skipping unknown provider"),
            }
        }
        order
    }
}

impl FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderName::OpenAi),
            "gemini" => Ok(ProviderName::Gemini),
            "groq" => Ok(ProviderName::Groq),
            other => Err(format!(
                "Invalid provider: {}. Expected: openai, gemini, or groq",
                other
            )),
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
