//! spam-rs: spam email classifier
//!
//! Trains a TF-IDF + logistic regression classifier on a labeled CSV
//! dataset once at startup and serves single-message predictions.
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::pipeline::TrainedPipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let pipeline = TrainedPipeline::build(&config.dataset, &config.model)?;
//!
//!     let prediction = pipeline.classify("WIN a FREE prize, reply now!")?;
//!     println!("{} ({:.2})", prediction.verdict(), prediction.spam_probability);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`dataset`]: CSV loading, cleaning and train/test split
//! - [`text`]: Normalisation and tokenisation
//! - [`features`]: TF-IDF vectorizer
//! - [`model`]: Logistic regression
//! - [`evaluation`]: Accuracy and classification report
//! - [`pipeline`]: Build-once, classify-many pipeline
//! - [`shell`]: Request/response cycle shared by the front-ends
//! - [`web`]: HTML and JSON front-end

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod shell;
pub mod text;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use pipeline::{Prediction, TrainedPipeline};
