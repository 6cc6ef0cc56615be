//! Tutorials front-end library
//!
//! View-models for listing, editing, and creating tutorials against the
//! REST backend.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
