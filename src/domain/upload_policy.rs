/// Limits applied to an uploaded file before any processing happens.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,
    #[error("unsafe filename: {0}")]
    UnsafeFilename(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("file too large: {size} bytes, max allowed: {max} bytes")]
    FileTooLarge { size: usize, max: usize },
    #[error("file is empty")]
    EmptyFile,
}

impl UploadPolicy {
    pub const DEFAULT_IMAGE_MAX_BYTES: usize = 16 * 1024 * 1024;
    pub const DEFAULT_AUDIO_MAX_BYTES: usize = 25 * 1024 * 1024;

    pub fn images(max_bytes: usize) -> Self {
        Self::new(&["png", "jpg", "jpeg"], max_bytes)
    }

    pub fn audio(max_bytes: usize) -> Self {
        Self::new(&["wav", "mp3", "m4a", "ogg", "flac"], max_bytes)
    }

    pub fn new(extensions: &[&str], max_bytes: usize) -> Self {
        Self {
            allowed_extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_bytes,
        }
    }

    /// Checks name, type and size. Returns the lower-cased extension.
    pub fn validate(&self, filename: &str, size: usize) -> Result<String, UploadError> {
        if filename.trim().is_empty() {
            return Err(UploadError::MissingFile);
        }
        if !is_safe_filename(filename) {
            return Err(UploadError::UnsafeFilename(filename.to_string()));
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or_else(|| UploadError::UnsupportedFileType(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(UploadError::UnsupportedFileType(extension));
        }
        if size == 0 {
            return Err(UploadError::EmptyFile);
        }
        if size > self.max_bytes {
            return Err(UploadError::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }

        Ok(extension)
    }
}

pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}
