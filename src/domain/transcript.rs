use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    #[serde(rename = "transcription")]
    pub text: String,
    pub symptoms: String,
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    pub provider: String,
}
