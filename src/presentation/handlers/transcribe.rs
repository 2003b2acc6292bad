use axum::Json;
use axum::extract::{Multipart, State};

use crate::application::ports::AudioClip;
use crate::domain::{Transcript, UploadError};
use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::upload_form::UploadForm;

const AUDIO_FIELDS: [&str; 2] = ["audio", "file"];

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Transcript>, ApiError> {
    let form = UploadForm::read(multipart, &AUDIO_FIELDS).await?;
    let filename = form.filename.ok_or(UploadError::MissingFile)?;

    let transcript = state
        .transcription_service
        .transcribe(AudioClip::new(form.data, filename))
        .await?;

    tracing::info!(
        provider = %transcript.provider,
        duration_secs = transcript.duration_secs,
        "Transcription complete"
    );

    Ok(Json(transcript))
}
