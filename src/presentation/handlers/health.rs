use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::ClassifierStatus;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub vision_providers: Vec<String>,
    pub audio_providers: Vec<String>,
    pub classifier: ClassifierStatus,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let vision_providers = state
        .analysis_service
        .router()
        .provider_names()
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        vision_providers,
        audio_providers: state.transcription_service.engine_names(),
        classifier: state.analysis_service.classifier_status(),
    })
}
