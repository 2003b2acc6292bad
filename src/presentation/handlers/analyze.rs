use axum::Json;
use axum::extract::{Multipart, State};

use crate::domain::{AnalysisMode, AnalysisRequest, NormalizedReport, Symptoms, UploadError};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::upload_form::UploadForm;

const IMAGE_FIELDS: [&str; 3] = ["xray_image", "image", "file"];

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<NormalizedReport>, ApiError> {
    let form = UploadForm::read(multipart, &IMAGE_FIELDS).await?;

    let filename = form.filename.clone().ok_or(UploadError::MissingFile)?;
    let mode: AnalysisMode = form
        .text("mode")
        .unwrap_or_default()
        .parse()
        .map_err(ApiError::invalid_input)?;
    let symptoms = Symptoms::new(form.text("symptoms").unwrap_or_default());

    tracing::info!(
        filename = %filename,
        mode = %mode,
        bytes = form.data.len(),
        symptoms = %sanitize_prompt(symptoms.as_str()),
        "Analysis requested"
    );

    let request = AnalysisRequest::new(filename, form.data, symptoms, mode);
    let report = state.analysis_service.analyze(request).await?;

    Ok(Json(report))
}
