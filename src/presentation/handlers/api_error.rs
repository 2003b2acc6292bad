use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::ClassifierError;
use crate::application::services::{
    AnalysisError, ImagePreparationError, RoutingError, TranscriptionServiceError,
};
use crate::domain::UploadError;

/// An error as returned to HTTP callers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, code = self.code, message = %self.message, "Request rejected");
        }

        (
            self.status,
            Json(ErrorResponse {
                error: ErrorBody {
                    code: self.code,
                    message: self.message,
                },
            }),
        )
            .into_response()
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        let (status, code) = match &e {
            UploadError::UnsupportedFileType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FILE_TYPE")
            }
            UploadError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            UploadError::MissingFile | UploadError::UnsafeFilename(_) | UploadError::EmptyFile => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT")
            }
        };
        Self::new(status, code, e.to_string())
    }
}

impl From<RoutingError> for ApiError {
    fn from(e: RoutingError) -> Self {
        let (status, code) = match &e {
            RoutingError::NoProvidersConfigured | RoutingError::AllProvidersFailed { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "PROVIDERS_UNAVAILABLE")
            }
            RoutingError::ImagePreparation(ImagePreparationError::Decode(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_IMAGE")
            }
            RoutingError::ImagePreparation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        Self::new(status, code, e.to_string())
    }
}

impl From<ClassifierError> for ApiError {
    fn from(e: ClassifierError) -> Self {
        let (status, code) = match &e {
            ClassifierError::ModelNotReady(_) | ClassifierError::ModelLoadFailed(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "MODEL_NOT_READY")
            }
            ClassifierError::InvalidImage(_) => (StatusCode::BAD_REQUEST, "INVALID_IMAGE"),
            ClassifierError::InferenceFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_FAILED")
            }
        };
        Self::new(status, code, e.to_string())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Upload(e) => e.into(),
            AnalysisError::Routing(e) => e.into(),
            AnalysisError::Classifier(e) => e.into(),
        }
    }
}

impl From<TranscriptionServiceError> for ApiError {
    fn from(e: TranscriptionServiceError) -> Self {
        match e {
            TranscriptionServiceError::EmptyAudio => Self::invalid_input(e.to_string()),
            TranscriptionServiceError::Upload(e) => e.into(),
            TranscriptionServiceError::NoProvidersConfigured
            | TranscriptionServiceError::AllProvidersFailed { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "TRANSCRIPTION_FAILED", e.to_string())
            }
        }
    }
}
