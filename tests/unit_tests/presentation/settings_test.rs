use std::collections::HashMap;

use pulmoscan::domain::ProviderName;
use pulmoscan::presentation::{Environment, Settings};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_no_variables_when_loading_settings_then_uses_defaults() {
    let settings = Settings::from_vars(Environment::Test, HashMap::new()).unwrap();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.http.timeout_secs, 120);
    assert_eq!(
        settings.vision_order(),
        vec![ProviderName::OpenAi, ProviderName::Gemini]
    );
    assert_eq!(
        settings.audio_order(),
        vec![ProviderName::Groq, ProviderName::OpenAi]
    );
    assert_eq!(settings.vision.openai.model, "gpt-4o-mini");
    assert_eq!(settings.vision.gemini.model, "gemini-2.5-flash");
    assert_eq!(settings.audio.groq.model, "whisper-large-v3");
    assert_eq!(settings.audio.openai.model, "whisper-1");
    assert_eq!(settings.upload.max_image_bytes, 16 * 1024 * 1024);
    assert!(settings.vision.openai.api_key.is_none());
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.ttl_secs, 300);
}

#[test]
fn given_conventional_variables_when_loading_settings_then_they_apply() {
    let settings = Settings::from_vars(
        Environment::Test,
        vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("GROQ_API_KEY", "gsk-test"),
            ("VISION_PROVIDER_ORDER", "groq,openai"),
            ("AUDIO_PROVIDER_ORDER", "openai"),
            ("FINETUNED_MODEL_PATH", "/models/custom"),
            ("PORT", "9100"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 9100);
    assert_eq!(
        settings.vision_order(),
        vec![ProviderName::Groq, ProviderName::OpenAi]
    );
    assert_eq!(settings.audio_order(), vec![ProviderName::OpenAi]);
    assert_eq!(settings.classifier.model_path, "/models/custom");
    assert_eq!(settings.vision.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(settings.audio.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(
        settings
            .transcription_engine_config(ProviderName::Groq)
            .api_key
            .as_deref(),
        Some("gsk-test")
    );
}

#[test]
fn given_prefixed_variables_when_loading_settings_then_override_nested_keys() {
    let settings = Settings::from_vars(
        Environment::Test,
        vars(&[
            ("APP__HTTP__TIMEOUT_SECS", "30"),
            ("APP__CACHE__ENABLED", "false"),
            ("APP__VISION__GROQ__MODEL", "llava-test"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.http.timeout_secs, 30);
    assert!(!settings.cache.enabled);
    assert_eq!(
        settings.vision_provider_config(ProviderName::Groq).model,
        "llava-test"
    );
}

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("local".to_string()),
        Ok(Environment::Local)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}
