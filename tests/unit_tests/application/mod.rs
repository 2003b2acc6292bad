mod report_normalizer_test;
mod symptom_extractor_test;
mod transcription_service_test;
