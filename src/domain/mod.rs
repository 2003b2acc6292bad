mod analysis_mode;
mod analysis_request;
mod classification;
mod confidence;
mod finding;
mod provider_name;
mod recommendation;
mod report;
mod symptoms;
mod transcript;
mod upload_policy;

pub use analysis_mode::AnalysisMode;
pub use analysis_request::AnalysisRequest;
pub use classification::{ClassLabel, Classification};
pub use confidence::Confidence;
pub use finding::{Finding, FindingStatus, Severity, TRACKED_FINDINGS};
pub use provider_name::ProviderName;
pub use recommendation::{Recommendation, Urgency};
pub use report::{LOCAL_CLASSIFIER_PROVIDER, NormalizedReport, ProviderAttempt};
pub use symptoms::{MAX_SYMPTOMS_LENGTH, NO_SYMPTOMS_PLACEHOLDER, Symptoms};
pub use transcript::Transcript;
pub use upload_policy::{UploadError, UploadPolicy, is_safe_filename};
