//! Linear spam classifier

pub mod logistic;

pub use logistic::{LogisticModel, LogisticRegression};
