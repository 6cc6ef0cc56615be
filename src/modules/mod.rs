pub mod tutorials;

pub use tutorials::{AddTutorialModel, TutorialDetailsModel, TutorialsListModel, ViewError};
