use axum::Router;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

use crate::helpers::{audio_clip, start_mock_server};
use pulmoscan::application::ports::{TranscriptionEngine, TranscriptionError};
use pulmoscan::domain::ProviderName;
use pulmoscan::infrastructure::audio::{
    OpenAiWhisperEngine, TranscriptionEngineConfig, TranscriptionEngineFactory,
};

fn engine(base_url: &str, api_key: Option<&str>) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new(
        "groq-whisper",
        api_key.map(String::from),
        base_url,
        "whisper-large-v3",
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_returns_trimmed_text() {
    let app = Router::new().route(
        "/audio/transcriptions",
        post(|headers: HeaderMap, mut multipart: Multipart| async move {
            let authorized =
                headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer gsk-test");
            let mut model = String::new();
            let mut filename = String::new();
            while let Ok(Some(field)) = multipart.next_field().await {
                match field.name() {
                    Some("model") => model = field.text().await.unwrap_or_default(),
                    Some("file") => filename = field.file_name().unwrap_or_default().to_string(),
                    _ => {}
                }
            }
            if authorized && model == "whisper-large-v3" && filename == "note.wav" {
                (StatusCode::OK, "  I have had a cough for three days.\n".to_string())
            } else {
                (StatusCode::BAD_REQUEST, format!("unexpected {model} {filename}"))
            }
        }),
    );
    let (base_url, shutdown_tx) = start_mock_server(app).await;

    let text = engine(&base_url, Some("gsk-test"))
        .transcribe(&audio_clip("note.wav", b"RIFF"))
        .await
        .unwrap();

    assert_eq!(text, "I have had a cough for three days.");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_returns_api_request_failed() {
    let app = Router::new().route(
        "/audio/transcriptions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let (base_url, shutdown_tx) = start_mock_server(app).await;

    let result = engine(&base_url, Some("gsk-test"))
        .transcribe(&audio_clip("note.wav", b"RIFF"))
        .await;

    match result {
        Err(TranscriptionError::ApiRequestFailed(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected ApiRequestFailed, got {other:?}"),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_api_key_when_transcribing_then_returns_missing_api_key() {
    let result = engine("http://127.0.0.1:9", Some(""))
        .transcribe(&audio_clip("note.wav", b"RIFF"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::MissingApiKey(name)) if name == "groq-whisper"));
}

#[test]
fn given_provider_order_when_creating_engines_then_gemini_is_skipped() {
    let client = reqwest::Client::new();
    let order = [ProviderName::Gemini, ProviderName::Groq, ProviderName::OpenAi];

    let engines = TranscriptionEngineFactory::create_ordered(&order, &client, |_| {
        TranscriptionEngineConfig {
            api_key: Some("key".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "whisper-1".to_string(),
        }
    });

    let names: Vec<&str> = engines.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["groq-whisper", "openai-whisper"]);
}
