use pulmoscan::application::services::extract_symptoms;

#[test]
fn given_symptom_sentences_when_extracting_then_keeps_only_matching_sentences() {
    let transcript = "I have had a fever for two days. My dog is fine. I feel short of breath and tired.";

    let symptoms = extract_symptoms(transcript);

    assert_eq!(symptoms, "had a fever for two days.  short of breath and tired");
}

#[test]
fn given_no_symptom_keywords_when_extracting_then_returns_transcript() {
    let transcript = "Hello, this is a test recording";

    assert_eq!(extract_symptoms(transcript), transcript);
}

#[test]
fn given_long_unmatched_transcript_when_extracting_then_truncates_to_200_chars() {
    let transcript = "blah ".repeat(100);

    let symptoms = extract_symptoms(&transcript);

    assert!(symptoms.ends_with("..."));
    assert_eq!(symptoms.chars().count(), 203);
}

#[test]
fn given_long_symptom_text_when_extracting_then_truncates_to_300_chars() {
    let transcript = format!("My chest hurts {}", "badly ".repeat(80));

    let symptoms = extract_symptoms(&transcript);

    assert!(symptoms.starts_with("My chest hurts"));
    assert_eq!(symptoms.chars().count(), 303);
}

#[test]
fn given_keyword_in_other_case_when_extracting_then_still_matches() {
    assert_eq!(extract_symptoms("COUGH all night"), "COUGH all night");
}
