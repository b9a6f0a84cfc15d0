use crate::errors::CredctlError;

/// RAM error code for detaching a policy that is not attached to the user.
pub const CODE_POLICY_NOT_ATTACHED: &str = "EntityNotExist.User.Policy";
/// RAM error code for a policy that does not exist.
pub const CODE_POLICY_NOT_FOUND: &str = "EntityNotExist.Policy";
/// RAM error code for a user that does not exist.
pub const CODE_USER_NOT_FOUND: &str = "EntityNotExist.User";

/// Coarse classification of a RAM failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamErrorKind {
    PolicyNotAttached,
    PolicyNotFound,
    UserNotFound,
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum RamError {
    #[error("RAM credentials are missing: {field} is empty")]
    MissingCredentials { field: &'static str },

    #[error("RAM {action} request failed: {message}")]
    Transport { action: String, message: String },

    #[error("RAM {action} returned {code} (HTTP {status}): {message} [RequestId: {request_id}]")]
    Api {
        action: String,
        status: u16,
        code: String,
        message: String,
        request_id: String,
    },

    #[error("RAM {action} returned an unreadable response (HTTP {status}): {message}")]
    InvalidResponse {
        action: String,
        status: u16,
        message: String,
    },
}

impl RamError {
    pub fn kind(&self) -> RamErrorKind {
        match self {
            RamError::Api { code, .. } => match code.as_str() {
                CODE_POLICY_NOT_ATTACHED => RamErrorKind::PolicyNotAttached,
                CODE_POLICY_NOT_FOUND => RamErrorKind::PolicyNotFound,
                CODE_USER_NOT_FOUND => RamErrorKind::UserNotFound,
                _ => RamErrorKind::Other,
            },
            _ => RamErrorKind::Other,
        }
    }

    /// Shorthand for an API error, mostly useful for test doubles.
    pub fn api(action: &str, code: &str, message: &str) -> Self {
        RamError::Api {
            action: action.to_string(),
            status: 404,
            code: code.to_string(),
            message: message.to_string(),
            request_id: String::new(),
        }
    }
}

impl CredctlError for RamError {
    fn error_code(&self) -> &'static str {
        match self {
            RamError::MissingCredentials { .. } => "RAM_MISSING_CREDENTIALS",
            RamError::Transport { .. } => "RAM_TRANSPORT_FAILED",
            RamError::Api { .. } => "RAM_API_ERROR",
            RamError::InvalidResponse { .. } => "RAM_INVALID_RESPONSE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, RamError::MissingCredentials { .. })
            || self.kind() != RamErrorKind::Other
    }
}
