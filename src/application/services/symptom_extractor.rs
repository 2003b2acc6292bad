const SYMPTOM_KEYWORDS: &[&str] = &[
    "pain",
    "ache",
    "hurt",
    "sore",
    "discomfort",
    "cough",
    "breathing",
    "shortness of breath",
    "chest",
    "heart",
    "lung",
    "stomach",
    "abdomen",
    "head",
    "fever",
    "temperature",
    "chills",
    "sweating",
    "fatigue",
    "tired",
    "weakness",
    "dizzy",
    "nausea",
    "vomiting",
    "diarrhea",
    "constipation",
    "migraine",
    "swelling",
    "inflammation",
    "redness",
    "rash",
    "injury",
    "fracture",
    "broken",
    "sprain",
    "strain",
];

const FILLER_PHRASES: &[&str] = &["I am experiencing", "I have", "I feel"];

const UNMATCHED_LIMIT: usize = 200;
const SUMMARY_LIMIT: usize = 300;

/// Pulls the sentences that mention a symptom out of a transcript.
///
/// Falls back to a shortened transcript when nothing matches.
pub fn extract_symptoms(transcript: &str) -> String {
    let sentences: Vec<&str> = transcript
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty() && mentions_symptom(s))
        .collect();

    if sentences.is_empty() {
        return truncate_with_ellipsis(transcript, UNMATCHED_LIMIT);
    }

    let mut summary = sentences.join(". ");
    for filler in FILLER_PHRASES {
        summary = summary.replace(filler, "");
    }

    truncate_with_ellipsis(summary.trim(), SUMMARY_LIMIT)
}

fn mentions_symptom(sentence: &str) -> bool {
    let lowered = sentence.to_lowercase();
    SYMPTOM_KEYWORDS.iter().any(|k| lowered.contains(k))
}

fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}
