//! Interactive shell
//!
//! Front-end independent request/response cycle shared by the web UI and
//! the terminal. Every submission is handled on its own; nothing is kept
//! between calls.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dataset::Record;
use crate::error::SpamError;
use crate::pipeline::{Prediction, TrainedPipeline};

pub const TITLE: &str = "Spam Email Classifier (Logistic Regression)";
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text.";

/// Static part of the page: preview and metrics
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub title: &'static str,
    pub preview: Vec<Record>,
    pub total_records: usize,
    /// Accuracy formatted with two decimals
    pub accuracy: String,
    /// Multi-line classification report
    pub report: String,
}

/// Result of one submit action
#[derive(Debug, Clone)]
pub enum ShellResponse {
    /// Input rejected, no classification performed
    Warning(String),
    Verdict(Prediction),
}

impl ShellResponse {
    /// User-facing message line
    pub fn message(&self) -> String {
        match self {
            ShellResponse::Warning(msg) => msg.clone(),
            ShellResponse::Verdict(p) if p.is_spam() => "This email is SPAM!".to_string(),
            ShellResponse::Verdict(_) => "This email is Not Spam.".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Shell {
    pipeline: Arc<TrainedPipeline>,
    preview_rows: usize,
}

impl Shell {
    pub fn new(pipeline: Arc<TrainedPipeline>, preview_rows: usize) -> Self {
        Self {
            pipeline,
            preview_rows,
        }
    }

    pub fn pipeline(&self) -> &TrainedPipeline {
        &self.pipeline
    }

    pub fn overview(&self) -> Overview {
        let evaluation = self.pipeline.evaluation();
        Overview {
            title: TITLE,
            preview: self.pipeline.preview(self.preview_rows).to_vec(),
            total_records: self.pipeline.corpus().len(),
            accuracy: format!("{:.2}", evaluation.accuracy),
            report: evaluation.report.to_string(),
        }
    }

    /// Handle one submitted text
    pub fn submit(&self, input: &str) -> ShellResponse {
        match self.pipeline.classify(input) {
            Ok(prediction) => {
                info!(
                    "Classified message as {} (p_spam = {:.3})",
                    prediction.verdict(),
                    prediction.spam_probability
                );
                ShellResponse::Verdict(prediction)
            }
            Err(SpamError::EmptyUserInput) => {
                ShellResponse::Warning(EMPTY_INPUT_WARNING.to_string())
            }
            Err(e) => {
                warn!("Classification failed: {}", e);
                ShellResponse::Warning(e.to_string())
            }
        }
    }

    /// Plain-text rendering of the overview for terminals
    pub fn render_overview(&self) -> String {
        self.overview().to_string()
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f)?;
        writeln!(
            f,
            "Dataset Overview ({} of {} records)",
            self.preview.len(),
            self.total_records
        )?;
        writeln!(f, "{:<6} {}", "label", "text")?;
        writeln!(f, "{:-<70}", "")?;
        for record in &self.preview {
            writeln!(f, "{:<6} {}", record.label.code(), truncate(&record.text, 63))?;
        }
        writeln!(f)?;
        writeln!(f, "Model Performance")?;
        writeln!(f, "Accuracy: {}", self.accuracy)?;
        writeln!(f, "Classification Report:")?;
        write!(f, "{}", self.report)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        short.push_str("...");
        short
    }
}
