use bytes::Bytes;

use super::{AnalysisMode, Symptoms};

/// One upload to analyze. Lives for a single HTTP request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub filename: String,
    pub image: Bytes,
    pub symptoms: Symptoms,
    pub mode: AnalysisMode,
}

impl AnalysisRequest {
    pub fn new(filename: String, image: Bytes, symptoms: Symptoms, mode: AnalysisMode) -> Self {
        Self {
            filename,
            image,
            symptoms,
            mode,
        }
    }
}
