mod analysis_service;
mod diagnosis_parser;
mod diagnosis_prompt;
mod fast_report;
mod image_preparation;
mod report_cache;
mod report_normalizer;
mod symptom_extractor;
mod transcription_service;
mod vision_router;

pub use analysis_service::{AnalysisError, AnalysisService};
pub use diagnosis_parser::{
    RawDiagnosis, RawFinding, RawRecommendation, RawRecommendationDetail, parse_diagnosis,
};
pub use diagnosis_prompt::build_diagnosis_prompt;
pub use fast_report::{URGENT_CONFIDENCE, build_fast_report};
pub use image_preparation::{
    ImagePreparationError, JPEG_QUALITY, MAX_VLM_DIMENSION, prepare_image, prepare_image_blocking,
};
pub use report_cache::{CacheKey, ReportCache};
pub use report_normalizer::{NOT_MEDICAL_IMAGE_WARNING, is_chest_xray, normalize_diagnosis};
pub use symptom_extractor::extract_symptoms;
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
pub use vision_router::{RoutedDiagnosis, RoutingError, VisionRouter};
