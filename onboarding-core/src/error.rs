// Error taxonomy for the onboarding engine
//
// Local field validation is NOT an error; it is a `ValidationResult` value
// returned to the caller. These variants cover remote calls, resume, file
// intake, and configuration.

use thiserror::Error;

/// User-facing fallback when the gateway gives us nothing better.
pub const GENERIC_REMOTE_FAILURE: &str =
    "Something went wrong while saving your application. Please try again.";

#[derive(Debug, Error)]
pub enum PortalError {
    /// The gateway reported `isSuccess=false` or the network call itself
    /// failed. The message is safe to show to the applicant; the wizard state
    /// is unchanged and the same step may be retried.
    #[error("{message}")]
    RemoteCall { message: String },

    /// The backend could not resolve the application id on resume. There is
    /// no safe state to resume into; the only recovery is redirecting to the
    /// application list.
    #[error("application '{application_id}' could not be resumed")]
    ResumeNotFound { application_id: String },

    /// An uploaded file violated size/type constraints. Rejected before any
    /// draft mutation.
    #[error("file rejected: {reason}")]
    FileValidation { reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortalError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteCall {
            message: message.into(),
        }
    }

    /// Remote failure carrying the generic user-facing fallback text.
    pub fn remote_fallback() -> Self {
        Self::RemoteCall {
            message: GENERIC_REMOTE_FAILURE.to_string(),
        }
    }

    pub fn file(reason: impl Into<String>) -> Self {
        Self::FileValidation {
            reason: reason.into(),
        }
    }
}
