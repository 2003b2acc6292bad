use std::collections::HashMap;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::{ProviderName, UploadPolicy};
use crate::infrastructure::audio::{
    GROQ_WHISPER_MODEL, OPENAI_WHISPER_MODEL, TranscriptionEngineConfig,
};
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;
use crate::infrastructure::vision::{
    GEMINI_BASE_URL, GEMINI_VISION_MODEL, GROQ_BASE_URL, GROQ_VISION_MODEL, OPENAI_BASE_URL,
    OPENAI_VISION_MODEL, VisionProviderConfig,
};

use super::Environment;

/// Conventional variables mapped onto settings keys, applied last.
const ENV_OVERRIDES: [(&str, &[&str]); 7] = [
    ("OPENAI_API_KEY", &["vision.openai.api_key", "audio.openai.api_key"]),
    ("GEMINI_API_KEY", &["vision.gemini.api_key"]),
    ("GROQ_API_KEY", &["vision.groq.api_key", "audio.groq.api_key"]),
    ("VISION_PROVIDER_ORDER", &["vision.order"]),
    ("AUDIO_PROVIDER_ORDER", &["audio.order"]),
    ("FINETUNED_MODEL_PATH", &["classifier.model_path"]),
    ("PORT", &["server.port"]),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub upload: UploadSettings,
    pub http: HttpSettings,
    pub vision: VisionSettings,
    pub audio: AudioSettings,
    pub classifier: ClassifierSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub format: String,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_image_bytes: usize,
    pub max_audio_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    pub order: String,
    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub order: String,
    pub openai: ProviderSettings,
    pub groq: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub model_path: String,
    pub preload: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub max_entries: usize,
}

impl Settings {
    /// Loads settings for `environment` from files and the process environment.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::from_vars(environment, std::env::vars().collect())
    }

    /// Same layering as [`Settings::load`], reading variables from `vars`.
    pub fn from_vars(
        environment: Environment,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.format", "pretty")?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?
            .set_default("upload.max_image_bytes", UploadPolicy::DEFAULT_IMAGE_MAX_BYTES as u64)?
            .set_default("upload.max_audio_bytes", UploadPolicy::DEFAULT_AUDIO_MAX_BYTES as u64)?
            .set_default("http.timeout_secs", 120)?
            .set_default("vision.order", "openai,gemini")?
            .set_default("vision.openai.base_url", OPENAI_BASE_URL)?
            .set_default("vision.openai.model", OPENAI_VISION_MODEL)?
            .set_default("vision.gemini.base_url", GEMINI_BASE_URL)?
            .set_default("vision.gemini.model", GEMINI_VISION_MODEL)?
            .set_default("vision.groq.base_url", GROQ_BASE_URL)?
            .set_default("vision.groq.model", GROQ_VISION_MODEL)?
            .set_default("audio.order", "groq,openai")?
            .set_default("audio.openai.base_url", OPENAI_BASE_URL)?
            .set_default("audio.openai.model", OPENAI_WHISPER_MODEL)?
            .set_default("audio.groq.base_url", GROQ_BASE_URL)?
            .set_default("audio.groq.model", GROQ_WHISPER_MODEL)?
            .set_default("classifier.model_path", "models/pneumonia-vit")?
            .set_default("classifier.preload", false)?
            .set_default("cache.enabled", true)?
            .set_default("cache.ttl_secs", 300)?
            .set_default("cache.max_entries", 128)?
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .source(Some(vars.clone())),
            );

        for (var, keys) in ENV_OVERRIDES {
            let value = vars.get(var).map(|v| v.trim()).filter(|v| !v.is_empty());
            if let Some(value) = value {
                for key in keys {
                    builder = builder.set_override(*key, value)?;
                }
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn vision_order(&self) -> Vec<ProviderName> {
        ProviderName::parse_order(&self.vision.order)
    }

    pub fn audio_order(&self) -> Vec<ProviderName> {
        ProviderName::parse_order(&self.audio.order)
    }

    pub fn vision_provider_config(&self, provider: ProviderName) -> VisionProviderConfig {
        let settings = match provider {
            ProviderName::OpenAi => &self.vision.openai,
            ProviderName::Gemini => &self.vision.gemini,
            ProviderName::Groq => &self.vision.groq,
        };
        VisionProviderConfig {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
        }
    }

    pub fn transcription_engine_config(&self, provider: ProviderName) -> TranscriptionEngineConfig {
        let settings = match provider {
            ProviderName::Groq => &self.audio.groq,
            _ => &self.audio.openai,
        };
        TranscriptionEngineConfig {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
        }
    }
}
