use std::sync::LazyLock;

use regex::Regex;

pub const MAX_SYMPTOMS_LENGTH: usize = 1000;
pub const NO_SYMPTOMS_PLACEHOLDER: &str = "No specific symptoms provided";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("static regex is valid"));

/// Patient-reported symptoms, stripped of markup before they reach a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Symptoms(String);

impl Symptoms {
    pub fn new(raw: &str) -> Self {
        let without_tags = HTML_TAG.replace_all(raw, "");
        let cleaned: String = without_tags
            .chars()
            .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
            .take(MAX_SYMPTOMS_LENGTH)
            .collect();
        Self(cleaned.trim().to_string())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text to embed in a provider prompt.
    pub fn for_prompt(&self) -> &str {
        if self.0.is_empty() {
            NO_SYMPTOMS_PLACEHOLDER
        } else {
            &self.0
        }
    }
}
