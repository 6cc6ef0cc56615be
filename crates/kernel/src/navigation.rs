use std::fmt;

use crate::model::TutorialId;

/// Views the front end can navigate between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Tutorials,
    TutorialDetails(TutorialId),
    AddTutorial,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Tutorials => "/tutorials".to_string(),
            Route::TutorialDetails(id) => format!("/tutorials/{id}"),
            Route::AddTutorial => "/add".to_string(),
        }
    }

    /// Resolve a path back into a route. The empty path redirects to the listing.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/tutorials" => Some(Route::Tutorials),
            "/add" => Some(Route::AddTutorial),
            _ => {
                let id = trimmed.strip_prefix("/tutorials/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(Route::TutorialDetails(TutorialId::from(id)))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives route changes requested by view-models.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records the route change in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = %route, "navigating");
    }
}
