use std::sync::Arc;

use tutorials_http::TutorialApi;
use tutorials_kernel::Tutorial;

use super::ViewError;

/// State behind the tutorials listing: the collection in server order, an
/// optional selection, and the search box text.
pub struct TutorialsListModel {
    api: Arc<dyn TutorialApi>,
    tutorials: Vec<Tutorial>,
    current_tutorial: Option<Tutorial>,
    current_index: Option<usize>,
    /// Search text bound to the title filter input.
    pub title: String,
}

impl TutorialsListModel {
    pub fn new(api: Arc<dyn TutorialApi>) -> Self {
        Self {
            api,
            tutorials: Vec::new(),
            current_tutorial: None,
            current_index: None,
            title: String::new(),
        }
    }

    /// Load the collection for the first render.
    pub async fn init(&mut self) -> Result<(), ViewError> {
        self.retrieve_tutorials().await
    }

    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Copy of the selected tutorial; `None` when nothing is selected.
    pub fn current_tutorial(&self) -> Option<&Tutorial> {
        self.current_tutorial.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Replace the collection with the backend's. Leaves it untouched on failure.
    pub async fn retrieve_tutorials(&mut self) -> Result<(), ViewError> {
        match self.api.get_all().await {
            Ok(tutorials) => {
                tracing::info!(count = tutorials.len(), "retrieved tutorials");
                tracing::debug!(?tutorials);
                self.tutorials = tutorials;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to retrieve tutorials");
                Err(e.into())
            }
        }
    }

    /// Clear the selection and reload the collection.
    pub async fn refresh_list(&mut self) -> Result<(), ViewError> {
        self.clear_selection();
        self.retrieve_tutorials().await
    }

    pub fn set_active_tutorial(&mut self, tutorial: &Tutorial, index: usize) {
        self.current_tutorial = Some(tutorial.clone());
        self.current_index = Some(index);
    }

    /// Delete the whole collection, then resynchronize with the backend.
    pub async fn remove_all_tutorials(&mut self) -> Result<(), ViewError> {
        match self.api.delete_all().await {
            Ok(ack) => {
                tracing::info!(%ack, "removed all tutorials");
                self.refresh_list().await
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to remove all tutorials");
                Err(e.into())
            }
        }
    }

    /// Replace the collection with the tutorials matching [`Self::title`].
    ///
    /// The selection is cleared along with it, since its index no longer
    /// points into the new collection.
    pub async fn search_title(&mut self) -> Result<(), ViewError> {
        self.clear_selection();
        match self.api.find_by_title(&self.title).await {
            Ok(tutorials) => {
                tracing::info!(title = %self.title, count = tutorials.len(), "searched tutorials");
                tracing::debug!(?tutorials);
                self.tutorials = tutorials;
                Ok(())
            }
            Err(e) => {
                tracing::error!(title = %self.title, error = %e, "failed to search tutorials");
                Err(e.into())
            }
        }
    }

    fn clear_selection(&mut self) {
        self.current_tutorial = None;
        self.current_index = None;
    }
}
