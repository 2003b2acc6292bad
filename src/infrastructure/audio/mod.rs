mod audio_probe;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use audio_probe::SymphoniaAudioProbe;
pub use openai_whisper_engine::{GROQ_WHISPER_MODEL, OPENAI_WHISPER_MODEL, OpenAiWhisperEngine};
pub use transcription_engine_factory::{TranscriptionEngineConfig, TranscriptionEngineFactory};
