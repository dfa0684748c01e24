//! Roadmap data shared by the layout engine and its callers.
//!
//! [`model`] is what a roadmap source produces, [`document`] unwraps the
//! different JSON envelopes a roadmap arrives in, and [`layout`] is what a
//! renderer consumes.

pub mod document;
pub mod layout;
pub mod model;

pub use document::{Difficulty, DocumentError, RoadmapDocument, SavedRoadmap};
pub use layout::*;
pub use model::*;
