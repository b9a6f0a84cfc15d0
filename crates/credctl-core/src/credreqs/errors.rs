use crate::errors::CredctlError;

#[derive(Debug, thiserror::Error)]
pub enum CredReqError {
    #[error("CredentialsRequest directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("CredentialsRequest path is not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to decode CredentialsRequest from '{path}': {message}")]
    DecodeFailed { path: String, message: String },

    #[error("CredentialsRequest '{name}' in '{path}' has no spec.secretRef.name")]
    MissingSecretRef { path: String, name: String },

    #[error("IO error reading CredentialsRequests: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CredctlError for CredReqError {
    fn error_code(&self) -> &'static str {
        match self {
            CredReqError::DirectoryNotFound { .. } => "CREDREQ_DIR_NOT_FOUND",
            CredReqError::NotADirectory { .. } => "CREDREQ_NOT_A_DIRECTORY",
            CredReqError::DecodeFailed { .. } => "CREDREQ_DECODE_FAILED",
            CredReqError::MissingSecretRef { .. } => "CREDREQ_MISSING_SECRET_REF",
            CredReqError::IoError { .. } => "CREDREQ_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, CredReqError::IoError { .. })
    }
}
