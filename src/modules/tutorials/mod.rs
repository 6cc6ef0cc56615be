//! View-models for the tutorials front end.
//!
//! Each view-model owns the state a rendering layer binds to and drives the
//! [`TutorialApi`] in response to user events. Operations log their outcome
//! through `tracing` and also hand it back as a [`ViewError`] so the caller
//! decides how to surface a failure.

pub mod add;
pub mod details;
pub mod list;

#[cfg(test)]
pub(crate) mod mock;

use thiserror::Error;
use tutorials_http::ClientError;

pub use add::AddTutorialModel;
pub use details::TutorialDetailsModel;
pub use list::TutorialsListModel;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The operation needs a persisted record but none is loaded.
    #[error("no persisted tutorial is loaded")]
    NotLoaded,
}

/// Pull the human-readable `message` out of a backend ack, if there is one.
fn ack_message(ack: &tutorials_http::Ack) -> Option<String> {
    ack.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
