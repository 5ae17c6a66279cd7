//! CSV dataset loading
//!
//! Reads a two-column (category, message) CSV file into a [`Corpus`].
//! Header names are matched loosely so the usual spellings of the public
//! SMS/mail spam datasets (`Category,Message`, `label,text`, `v1,v2`) all work.

use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::{Corpus, Label, LoadStats, Record};
use crate::error::{Result, SpamError};
use crate::text::normalize;

const LABEL_COLUMNS: &[&str] = &["category", "label", "class", "v1"];
const TEXT_COLUMNS: &[&str] = &["message", "text", "body", "v2"];

/// Loads a labeled corpus from a CSV file
pub struct DatasetLoader {
    path: PathBuf,
    strict: bool,
}

/// Why a row was rejected
enum Rejection {
    Malformed(String),
    UnknownLabel(String),
    MissingText,
    EmptyAfterNormalization,
}

impl DatasetLoader {
    /// Create a loader for `path` in lenient mode
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            strict: false,
        }
    }

    /// In strict mode malformed rows and unknown labels fail the load
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read, clean and label every row of the file
    pub fn load(&self) -> Result<Corpus> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SpamError::DatasetNotFound(self.path.clone()),
            _ => SpamError::Io(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let (label_idx, text_idx) = resolve_columns(reader.headers()?);
        debug!(
            "Using column {} as label and column {} as text",
            label_idx, text_idx
        );

        let mut stats = LoadStats::default();
        let mut records = Vec::new();

        for result in reader.byte_records() {
            stats.rows_read += 1;

            let (line, outcome) = match result {
                Ok(row) => {
                    let line = row.position().map(|p| p.line()).unwrap_or(0);
                    (line, parse_row(&row, label_idx, text_idx))
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    (line, Err(Rejection::Malformed(e.to_string())))
                }
            };

            match outcome {
                Ok(record) => {
                    stats.rows_kept += 1;
                    records.push(record);
                }
                Err(Rejection::Malformed(reason)) => {
                    if self.strict {
                        return Err(SpamError::MalformedRow { line, reason });
                    }
                    debug!("Dropping malformed row at line {}: {}", line, reason);
                    stats.dropped_malformed += 1;
                }
                Err(Rejection::MissingText) => {
                    if self.strict {
                        return Err(SpamError::MalformedRow {
                            line,
                            reason: "missing message text".to_string(),
                        });
                    }
                    debug!("Dropping row at line {}: missing message text", line);
                    stats.dropped_empty_text += 1;
                }
                Err(Rejection::UnknownLabel(label)) => {
                    if self.strict {
                        return Err(SpamError::UnknownLabel { line, label });
                    }
                    debug!("Dropping row at line {}: unknown label '{}'", line, label);
                    stats.dropped_unknown_label += 1;
                }
                // Never fatal, even in strict mode
                Err(Rejection::EmptyAfterNormalization) => {
                    debug!("Dropping row at line {}: empty after normalization", line);
                    stats.dropped_empty_text += 1;
                }
            }
        }

        if stats.dropped() > 0 {
            warn!(
                "Dropped {} of {} rows ({} malformed, {} unknown label, {} empty text)",
                stats.dropped(),
                stats.rows_read,
                stats.dropped_malformed,
                stats.dropped_unknown_label,
                stats.dropped_empty_text
            );
        }

        if records.is_empty() {
            return Err(SpamError::EmptyDatasetAfterCleaning);
        }

        info!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );

        Ok(Corpus::new(records, stats))
    }
}

/// Find the label and text columns by header name, falling back to position
fn resolve_columns(headers: &StringRecord) -> (usize, usize) {
    let find = |aliases: &[&str]| {
        headers
            .iter()
            .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
    };

    let other = |idx: usize| if idx == 0 { 1 } else { 0 };

    match (find(LABEL_COLUMNS), find(TEXT_COLUMNS)) {
        (Some(label), Some(text)) => (label, text),
        (Some(label), None) => (label, other(label)),
        (None, Some(text)) => (other(text), text),
        (None, None) => (0, 1),
    }
}

fn parse_row(
    row: &ByteRecord,
    label_idx: usize,
    text_idx: usize,
) -> std::result::Result<Record, Rejection> {
    let needed = label_idx.max(text_idx) + 1;
    let (raw_label, raw_text) = match (row.get(label_idx), row.get(text_idx)) {
        (Some(label), Some(text)) => (label, text),
        _ => {
            return Err(Rejection::Malformed(format!(
                "expected at least {} fields, found {}",
                needed,
                row.len()
            )))
        }
    };

    let label_str = std::str::from_utf8(raw_label)
        .map_err(|_| Rejection::Malformed("label is not valid UTF-8".to_string()))?;
    let text_str = std::str::from_utf8(raw_text)
        .map_err(|_| Rejection::Malformed("message is not valid UTF-8".to_string()))?;

    let label = Label::from_category(label_str)
        .ok_or_else(|| Rejection::UnknownLabel(label_str.to_string()))?;

    if text_str.trim().is_empty() {
        return Err(Rejection::MissingText);
    }

    let text = normalize(text_str);
    if text.is_empty() {
        return Err(Rejection::EmptyAfterNormalization);
    }

    Ok(Record { text, label })
}
