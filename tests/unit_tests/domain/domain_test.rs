use std::str::FromStr;

use pulmoscan::domain::{
    AnalysisMode, ClassLabel, Classification, Confidence, MAX_SYMPTOMS_LENGTH,
    NO_SYMPTOMS_PLACEHOLDER, ProviderName, Symptoms, UploadError, UploadPolicy, Urgency,
    is_safe_filename,
};

#[test]
fn given_symptoms_with_markup_when_sanitizing_then_strips_tags_and_quotes() {
    let symptoms = Symptoms::new("<b>Cough</b> and \"fever\" <script>x</script>");

    assert_eq!(symptoms.as_str(), "Cough and fever x");
}

#[test]
fn given_overlong_symptoms_when_sanitizing_then_truncates() {
    let symptoms = Symptoms::new(&"a".repeat(MAX_SYMPTOMS_LENGTH + 50));

    assert_eq!(symptoms.as_str().chars().count(), MAX_SYMPTOMS_LENGTH);
}

#[test]
fn given_blank_symptoms_when_building_prompt_text_then_uses_placeholder() {
    assert_eq!(Symptoms::new("   ").for_prompt(), NO_SYMPTOMS_PLACEHOLDER);
    assert_eq!(Symptoms::new("wheezing").for_prompt(), "wheezing");
}

#[test]
fn given_image_policy_when_validating_then_accepts_allowed_types_case_insensitively() {
    let policy = UploadPolicy::images(1024);

    assert_eq!(policy.validate("chest.JPG", 10), Ok("jpg".to_string()));
    assert_eq!(policy.validate("chest.png", 10), Ok("png".to_string()));
}

#[test]
fn given_image_policy_when_validating_bad_uploads_then_reports_reason() {
    let policy = UploadPolicy::images(100);

    assert_eq!(
        policy.validate("chest.bmp", 10),
        Err(UploadError::UnsupportedFileType("bmp".to_string()))
    );
    assert!(matches!(
        policy.validate("noextension", 10),
        Err(UploadError::UnsupportedFileType(_))
    ));
    assert_eq!(
        policy.validate("chest.png", 101),
        Err(UploadError::FileTooLarge { size: 101, max: 100 })
    );
    assert_eq!(policy.validate("chest.png", 0), Err(UploadError::EmptyFile));
    assert_eq!(policy.validate("", 10), Err(UploadError::MissingFile));
    assert!(matches!(
        policy.validate("../etc/chest.png", 10),
        Err(UploadError::UnsafeFilename(_))
    ));
}

#[test]
fn given_path_like_names_when_checking_filename_then_rejects_traversal() {
    assert!(is_safe_filename("xray.png"));
    assert!(!is_safe_filename("a/b.png"));
    assert!(!is_safe_filename("a\\b.png"));
    assert!(!is_safe_filename("..png"));
}

#[test]
fn given_reported_scores_when_building_confidence_then_always_within_unit_range() {
    assert_eq!(Confidence::from_reported(Some(0.4), Confidence::ZERO).value(), 0.4);
    assert_eq!(Confidence::from_reported(Some(40.0), Confidence::ZERO).value(), 0.4);
    assert_eq!(Confidence::from_reported(Some(1.0), Confidence::ZERO).value(), 1.0);
    assert_eq!(Confidence::from_reported(Some(400.0), Confidence::ZERO).value(), 1.0);
    assert_eq!(Confidence::from_reported(Some(f64::NAN), Confidence::NEUTRAL).value(), 0.5);
    assert_eq!(Confidence::from_reported(None, Confidence::ZERO).value(), 0.0);
    assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
}

#[test]
fn given_provider_list_when_parsing_order_then_skips_unknown_and_duplicates() {
    let order = ProviderName::parse_order(" OpenAI , claude,gemini,openai,, groq ");

    assert_eq!(
        order,
        vec![ProviderName::OpenAi, ProviderName::Gemini, ProviderName::Groq]
    );
}

#[test]
fn given_mode_strings_when_parsing_then_defaults_to_detailed() {
    assert_eq!(AnalysisMode::from_str("FAST"), Ok(AnalysisMode::Fast));
    assert_eq!(AnalysisMode::from_str(""), Ok(AnalysisMode::Detailed));
    assert!(AnalysisMode::from_str("turbo").is_err());
}

#[test]
fn given_probabilities_when_classifying_then_picks_larger_label() {
    let normal = Classification::from_probabilities(0.6, 0.4);
    let pneumonia = Classification::from_probabilities(0.4, 0.6);

    assert_eq!(normal.label, ClassLabel::Normal);
    assert_eq!(pneumonia.label, ClassLabel::Pneumonia);
    assert_eq!(ClassLabel::from_index(1), Some(ClassLabel::Pneumonia));
    assert_eq!(ClassLabel::from_index(2), None);
}

#[test]
fn given_urgency_synonyms_when_parsing_then_maps_leniently() {
    assert_eq!(Urgency::parse_lenient("HIGH"), Urgency::Urgent);
    assert_eq!(Urgency::parse_lenient("critical"), Urgency::Emergency);
    assert_eq!(Urgency::parse_lenient("whenever"), Urgency::Routine);
}
