use std::sync::Arc;

use tutorials_http::TutorialApi;
use tutorials_kernel::{Navigator, Route, Tutorial, TutorialId};

use super::{ack_message, ViewError};

const STATUS_UPDATED: &str = "The status was updated successfully!";
const TUTORIAL_UPDATED: &str = "This tutorial was updated successfully!";

/// Edit view for a single persisted tutorial.
pub struct TutorialDetailsModel {
    api: Arc<dyn TutorialApi>,
    navigator: Arc<dyn Navigator>,
    current_tutorial: Tutorial,
    message: Option<String>,
}

impl TutorialDetailsModel {
    pub fn new(api: Arc<dyn TutorialApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            current_tutorial: Tutorial::default(),
            message: None,
        }
    }

    pub fn current_tutorial(&self) -> &Tutorial {
        &self.current_tutorial
    }

    /// Outcome of the last successful update, for display.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.current_tutorial.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.current_tutorial.description = description.into();
    }

    /// Load the record the view was opened for. On failure the previous
    /// record stays in place.
    pub async fn get_tutorial(&mut self, id: &TutorialId) -> Result<(), ViewError> {
        self.message = None;
        match self.api.get(id).await {
            Ok(tutorial) => {
                tracing::info!(%id, "loaded tutorial");
                tracing::debug!(?tutorial);
                self.current_tutorial = tutorial;
                Ok(())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to load tutorial");
                Err(e.into())
            }
        }
    }

    /// Set the published flag locally, then persist the record.
    ///
    /// The local write is not rolled back if the update fails.
    pub async fn update_published(&mut self, status: bool) -> Result<(), ViewError> {
        let id = self.persisted_id()?;
        self.message = None;
        self.current_tutorial.published = status;

        match self.api.update(&id, &self.current_tutorial).await {
            Ok(ack) => {
                tracing::info!(%id, published = status, "updated publish status");
                self.message =
                    Some(ack_message(&ack).unwrap_or_else(|| STATUS_UPDATED.to_string()));
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    %id,
                    published = status,
                    error = %e,
                    "failed to update publish status"
                );
                Err(e.into())
            }
        }
    }

    /// Persist the current draft as a whole.
    pub async fn update_tutorial(&mut self) -> Result<(), ViewError> {
        let id = self.persisted_id()?;
        self.message = None;

        match self.api.update(&id, &self.current_tutorial).await {
            Ok(ack) => {
                tracing::info!(%id, %ack, "updated tutorial");
                self.message =
                    Some(ack_message(&ack).unwrap_or_else(|| TUTORIAL_UPDATED.to_string()));
                Ok(())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to update tutorial");
                Err(e.into())
            }
        }
    }

    /// Delete the record and return to the listing. Stays put on failure.
    pub async fn delete_tutorial(&mut self) -> Result<(), ViewError> {
        let id = self.persisted_id()?;

        match self.api.delete(&id).await {
            Ok(ack) => {
                tracing::info!(%id, %ack, "deleted tutorial");
                self.navigator.navigate(Route::Tutorials);
                Ok(())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to delete tutorial");
                Err(e.into())
            }
        }
    }

    fn persisted_id(&self) -> Result<TutorialId, ViewError> {
        self.current_tutorial.id.clone().ok_or_else(|| {
            tracing::warn!("no persisted tutorial loaded");
            ViewError::NotLoaded
        })
    }
}
