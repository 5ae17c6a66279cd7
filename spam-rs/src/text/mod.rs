//! Text preprocessing
//!
//! Normalisation is shared by training and prediction so both sides see the
//! same canonical form.

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{normalize, normalize_value};
pub use tokenizer::tokenize;
