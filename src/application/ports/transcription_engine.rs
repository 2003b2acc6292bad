use async_trait::async_trait;
use bytes::Bytes;

/// An uploaded voice recording.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Bytes,
    pub filename: String,
    pub mime_type: String,
}

impl AudioClip {
    pub fn new(data: Bytes, filename: String) -> Self {
        let mime_type = mime_for_audio(&filename).to_string();
        Self {
            data,
            filename,
            mime_type,
        }
    }
}

fn mime_for_audio(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Identity reported to callers, e.g. `groq-whisper`.
    fn name(&self) -> &str;

    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api key not configured for {0}")]
    MissingApiKey(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}

/// Reads container metadata without decoding the whole clip.
pub trait AudioProbe: Send + Sync {
    /// Duration in seconds, or `None` when the headers do not say.
    fn duration_secs(&self, audio: &AudioClip) -> Option<f64>;
}
