//! Process-level lifecycle events.

use tracing::{error, info, warn};

use crate::errors::CredctlError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        started_at = %chrono::Utc::now().to_rfc3339()
    );
}

/// Record an error that is about to end the process.
///
/// User errors (bad flags, bad manifests) log at warn; everything else at error.
pub fn log_app_error(error: &dyn CredctlError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error_code = error.error_code(),
            error = %error
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    }
}
