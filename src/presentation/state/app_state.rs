use std::sync::Arc;

use crate::application::services::{AnalysisService, TranscriptionService};

#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub transcription_service: Arc<TranscriptionService>,
}
