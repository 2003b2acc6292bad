mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, CacheSettings, ClassifierSettings, HttpSettings, LoggingSettings,
    ProviderSettings, ServerSettings, Settings, UploadSettings, VisionSettings,
};
