mod analyze;
mod api_error;
mod health;
mod transcribe;
mod upload_form;

pub use analyze::analyze_handler;
pub use api_error::{ApiError, ErrorBody, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use transcribe::transcribe_handler;
pub use upload_form::UploadForm;
