//! Feature extraction
//!
//! TF-IDF vectors over a vocabulary frozen at fit time.

pub mod stop_words;
pub mod tfidf;
pub mod vector;

pub use stop_words::StopWords;
pub use tfidf::{TfidfModel, TfidfVectorizer};
pub use vector::SparseVector;
