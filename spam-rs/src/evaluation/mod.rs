//! Held-out evaluation

pub mod metrics;

pub use metrics::{evaluate, ClassMetrics, ClassificationReport, ConfusionMatrix, Evaluation};
