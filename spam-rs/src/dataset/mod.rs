//! Labeled email dataset
//!
//! Loading, cleaning and the deterministic train/test split.

pub mod loader;
pub mod types;

pub use loader::DatasetLoader;
pub use types::*;
