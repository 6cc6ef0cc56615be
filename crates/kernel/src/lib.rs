//! Settings, the Tutorial data model, and the navigation contract shared by
//! the client, the view-models, and the command-line front end.

pub mod model;
pub mod navigation;
pub mod settings;

pub use model::{Tutorial, TutorialId, TutorialPayload};
pub use navigation::{LogNavigator, Navigator, Route};
