//! External collaborators behind trait seams.

pub mod label_source;

pub use label_source::{FixedLabelSource, LabelSource, RandomLabelSource};
