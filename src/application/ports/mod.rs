mod image_classifier;
mod transcription_engine;
mod vision_provider;

pub use image_classifier::{ClassifierError, ClassifierStatus, ImageClassifier};
pub use transcription_engine::{AudioClip, AudioProbe, TranscriptionEngine, TranscriptionError};
pub use vision_provider::{PreparedImage, VisionProvider, VisionProviderError};
