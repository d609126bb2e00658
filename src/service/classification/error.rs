//! Error taxonomy for the classification round-trip.

use thiserror::Error;

use crate::service::llm::CompletionError;
use crate::store::StoreError;

/// Error type for one classification submission.
///
/// Every failure is caught at the submission boundary and rendered as a
/// single human-readable message; none leaves the store modified.
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// No credential supplied; blocked before any network activity.
    #[error("API key required")]
    MissingCredential,

    /// A prior submission is still awaiting its response.
    #[error("a classification request is already in flight")]
    SubmissionInFlight,

    /// Network failure or non-success status from the endpoint. Carries the
    /// provider's message verbatim when one was present.
    #[error("classification request failed: {0}")]
    Transport(String),

    /// The endpoint answered, but not with the expected JSON payload.
    #[error("could not parse classification response: {0}")]
    MalformedResponse(String),

    /// Reconciliation referenced a row that does not exist. Indicates a bug
    /// in the apply path, not a model or user error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CompletionError> for ClassificationError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Http(e) => ClassificationError::Transport(e.to_string()),
            CompletionError::Api(message) => ClassificationError::Transport(message),
            CompletionError::Envelope(message) => ClassificationError::MalformedResponse(message),
            CompletionError::MissingPayload => {
                ClassificationError::MalformedResponse("response carried no text payload".to_string())
            }
        }
    }
}
