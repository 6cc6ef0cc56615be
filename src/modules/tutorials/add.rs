use std::sync::Arc;

use tutorials_http::TutorialApi;
use tutorials_kernel::Tutorial;

use super::ViewError;

/// Create form: a draft plus the submitted flag that switches the view to
/// its confirmation state.
pub struct AddTutorialModel {
    api: Arc<dyn TutorialApi>,
    tutorial: Tutorial,
    submitted: bool,
}

impl AddTutorialModel {
    pub fn new(api: Arc<dyn TutorialApi>) -> Self {
        Self {
            api,
            tutorial: Tutorial::default(),
            submitted: false,
        }
    }

    /// The draft, or the created record once submitted.
    pub fn tutorial(&self) -> &Tutorial {
        &self.tutorial
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.tutorial.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.tutorial.description = description.into();
    }

    pub fn set_published(&mut self, published: bool) {
        self.tutorial.published = published;
    }

    /// Submit the draft. On success the backend's record, id included,
    /// replaces the draft.
    pub async fn save_tutorial(&mut self) -> Result<(), ViewError> {
        let payload = self.tutorial.payload();

        match self.api.create(&payload).await {
            Ok(created) => {
                tracing::info!(id = ?created.id, title = %created.title, "created tutorial");
                self.tutorial = created;
                self.submitted = true;
                Ok(())
            }
            Err(e) => {
                tracing::error!(title = %payload.title, error = %e, "failed to create tutorial");
                Err(e.into())
            }
        }
    }

    /// Start over with an empty draft.
    pub fn new_tutorial(&mut self) {
        self.tutorial = Tutorial::default();
        self.submitted = false;
    }
}
