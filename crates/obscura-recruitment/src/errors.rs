use thiserror::Error;

use crate::validation::ValidationFailure;

/// Reasons why an application could not be submitted. Each one
/// displays as the message shown to the applicant.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(ValidationFailure),
    #[error("Authentication error. Please re-login.")]
    Authentication,
    #[error("Failed to upload photo: {cause}")]
    Upload { cause: String },
    #[error("Submission failed. Please try again.")]
    Write,
    #[error("An application is already being submitted.")]
    AlreadySubmitting,
    #[error("This application has already been submitted.")]
    AlreadySubmitted,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("You must be signed in to review applications.")]
    NotSignedIn,
    #[error("Only admins can review applications.")]
    NotAdmin,
    #[error("Could not save the review. Please try again.")]
    Write,
}

#[derive(Debug, Error)]
#[error("could not resolve the current identity")]
pub struct IdentityError;

/// Upload failure reported by the storage service, carrying its
/// own explanation of what went wrong.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("could not access the records table")]
pub struct RecordError;

#[derive(Debug, Error)]
#[error("failed to perform HTTP request to the backend")]
pub struct RequestHttpError;

#[derive(Debug, Error)]
#[error("could not set up the backend client")]
pub struct BackendSetupError;

pub mod tags {
    use obscura_utils::Error;

    pub fn install_hook() {
        RequestHttpTag::install_hook();
    }

    /// Which backend request has failed.
    pub struct RequestHttpTag {
        method: reqwest::Method,
        path: String,
    }

    impl RequestHttpTag {
        pub(crate) fn new(method: reqwest::Method, path: &str) -> Self {
            Self {
                method,
                path: path.into(),
            }
        }

        fn install_hook() {
            Error::install_hook::<Self>(|this, ctx| {
                ctx.push_body(format!("method: {}", this.method));
                ctx.push_body(format!("path: {}", this.path));
            });
        }
    }
}
