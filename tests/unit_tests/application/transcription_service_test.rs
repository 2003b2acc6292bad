use std::sync::Arc;

use bytes::Bytes;

use crate::helpers::{FixedDurationProbe, StubTranscriptionEngine, audio_clip};
use pulmoscan::application::ports::{AudioClip, TranscriptionEngine};
use pulmoscan::application::services::{TranscriptionService, TranscriptionServiceError};
use pulmoscan::domain::{UploadError, UploadPolicy};

fn service(engines: Vec<Arc<dyn TranscriptionEngine>>) -> TranscriptionService {
    TranscriptionService::new(
        engines,
        Arc::new(FixedDurationProbe(Some(4.5))),
        UploadPolicy::audio(UploadPolicy::DEFAULT_AUDIO_MAX_BYTES),
    )
}

#[tokio::test]
async fn given_first_engine_fails_when_transcribing_then_falls_back_to_next() {
    let groq = StubTranscriptionEngine::failing("groq-whisper", "status 429");
    let openai = StubTranscriptionEngine::replying(
        "openai-whisper",
        "I have a bad cough. The weather is nice.",
    );
    let service = service(vec![groq.clone(), openai.clone()]);

    let transcript = service
        .transcribe(audio_clip("note.wav", b"RIFF fake audio"))
        .await
        .unwrap();

    assert_eq!(transcript.provider, "openai-whisper");
    assert_eq!(transcript.symptoms, "a bad cough");
    assert_eq!(transcript.duration_secs, 4.5);
    assert_eq!(groq.call_count(), 1);
}

#[tokio::test]
async fn given_blank_transcript_when_transcribing_then_skips_engine() {
    let groq = StubTranscriptionEngine::replying("groq-whisper", "   ");
    let openai = StubTranscriptionEngine::replying("openai-whisper", "Chest pain since Monday");
    let service = service(vec![groq, openai]);

    let transcript = service
        .transcribe(audio_clip("note.mp3", b"ID3 fake"))
        .await
        .unwrap();

    assert_eq!(transcript.provider, "openai-whisper");
    assert_eq!(transcript.text, "Chest pain since Monday");
}

#[tokio::test]
async fn given_all_engines_fail_when_transcribing_then_carries_last_error() {
    let service = service(vec![
        StubTranscriptionEngine::failing("groq-whisper", "timeout"),
        StubTranscriptionEngine::failing("openai-whisper", "status 401"),
    ]);

    let result = service.transcribe(audio_clip("note.ogg", b"OggS")).await;

    match result {
        Err(TranscriptionServiceError::AllProvidersFailed { last_error }) => {
            assert!(last_error.contains("openai-whisper"));
            assert!(last_error.contains("status 401"));
        }
        other => panic!("expected AllProvidersFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_empty_audio_when_transcribing_then_rejects_before_engine_call() {
    let engine = StubTranscriptionEngine::replying("groq-whisper", "hello");
    let service = service(vec![engine.clone()]);

    let result = service
        .transcribe(AudioClip::new(Bytes::new(), "note.wav".to_string()))
        .await;

    assert!(matches!(result, Err(TranscriptionServiceError::EmptyAudio)));
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn given_unsupported_audio_type_when_transcribing_then_rejects_upload() {
    let engine = StubTranscriptionEngine::replying("groq-whisper", "hello");
    let service = service(vec![engine.clone()]);

    let result = service.transcribe(audio_clip("note.aac", b"data")).await;

    assert!(matches!(
        result,
        Err(TranscriptionServiceError::Upload(UploadError::UnsupportedFileType(_)))
    ));
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn given_no_engines_when_transcribing_then_returns_no_providers_configured() {
    let service = service(Vec::new());

    let result = service.transcribe(audio_clip("note.flac", b"fLaC")).await;

    assert!(matches!(
        result,
        Err(TranscriptionServiceError::NoProvidersConfigured)
    ));
}
