use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset not found: '{}'. Place the CSV file next to the binary or set dataset.path", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("Dataset is empty after preprocessing. Please check your CSV file")]
    EmptyDatasetAfterCleaning,

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Unknown label '{label}' at line {line}")]
    UnknownLabel { line: u64, label: String },

    #[error("Empty vocabulary: training documents contain only stop words or no terms")]
    EmptyVocabulary,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Model fitting failed: {0}")]
    Model(String),

    #[error("Please enter some text")]
    EmptyUserInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SpamError {
    /// Whether the error should stop the process (as opposed to a per-request warning)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SpamError::EmptyUserInput)
    }
}

pub type Result<T> = std::result::Result<T, SpamError>;
