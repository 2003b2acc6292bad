mod gemini_vision_provider;
mod openai_compatible_vision_provider;
mod vision_provider_factory;

pub use gemini_vision_provider::{GEMINI_BASE_URL, GEMINI_VISION_MODEL, GeminiVisionProvider};
pub use openai_compatible_vision_provider::{
    GROQ_BASE_URL, GROQ_VISION_MODEL, OPENAI_BASE_URL, OPENAI_VISION_MODEL,
    OpenAiCompatibleVisionProvider,
};
pub use vision_provider_factory::{VisionProviderConfig, VisionProviderFactory};
