use crate::credreqs::CredReqError;
use crate::errors::CredctlError;
use crate::ram::RamError;

#[derive(Debug, thiserror::Error)]
pub enum TeardownError {
    #[error("Failed to process files containing CredentialsRequests: {source}")]
    LoadFailed {
        #[from]
        source: CredReqError,
    },

    #[error("Failed to detach policy '{policy}' from user '{user}': {source}")]
    DetachFailed {
        policy: String,
        user: String,
        #[source]
        source: RamError,
    },

    #[error("Failed to delete policy '{policy}': {source}")]
    DeleteFailed {
        policy: String,
        #[source]
        source: RamError,
    },
}

impl TeardownError {
    /// Policy the failing step targeted, if the failure was remote.
    pub fn policy(&self) -> Option<&str> {
        match self {
            TeardownError::LoadFailed { .. } => None,
            TeardownError::DetachFailed { policy, .. }
            | TeardownError::DeleteFailed { policy, .. } => Some(policy.as_str()),
        }
    }
}

impl CredctlError for TeardownError {
    fn error_code(&self) -> &'static str {
        match self {
            TeardownError::LoadFailed { .. } => "TEARDOWN_LOAD_FAILED",
            TeardownError::DetachFailed { .. } => "TEARDOWN_DETACH_FAILED",
            TeardownError::DeleteFailed { .. } => "TEARDOWN_DELETE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            TeardownError::LoadFailed { source } => source.is_user_error(),
            TeardownError::DetachFailed { source, .. }
            | TeardownError::DeleteFailed { source, .. } => source.is_user_error(),
        }
    }
}
