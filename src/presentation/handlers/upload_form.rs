use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use bytes::Bytes;

use super::api_error::ApiError;

/// A file field plus the plain text fields of one multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub filename: Option<String>,
    pub data: Bytes,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Reads the whole form. The first field named in `file_fields` is taken as the upload;
    /// other file parts are skipped.
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if file_fields.contains(&name.as_str()) && form.filename.is_none() {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                tracing::debug!(field = %name, filename = %filename, bytes = data.len(), "File received");
                form.filename = Some(filename);
                form.data = data;
            } else if field.file_name().is_some() {
                tracing::debug!(field = %name, "Ignoring file under unexpected field name");
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", e.body_text())
    } else {
        ApiError::invalid_input(format!("Failed to read multipart: {}", e.body_text()))
    }
}
