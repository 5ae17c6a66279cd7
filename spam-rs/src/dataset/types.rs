//! Dataset types and data structures

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SpamError};

/// Binary message class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Legitimate mail ("ham"), code 0
    Ham,
    /// Spam, code 1
    Spam,
}

impl Label {
    /// Map a category string from the dataset to a label.
    ///
    /// Only the exact strings `ham` and `spam` are recognized; anything else,
    /// including padded or capitalized variants, yields `None`.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "ham" => Some(Label::Ham),
            "spam" => Some(Label::Spam),
            _ => None,
        }
    }

    /// Binary indicator: 0 for ham, 1 for spam
    pub fn code(self) -> u8 {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }

    /// Text shown to users for a prediction
    pub fn verdict(self) -> &'static str {
        match self {
            Label::Ham => "Not Spam",
            Label::Spam => "SPAM",
        }
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }

    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cleaned, labeled message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Normalized message text
    pub text: String,
    pub label: Label,
}

/// Counters collected while reading the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStats {
    /// Data rows read (header excluded)
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows that could not be parsed (bad encoding, missing fields)
    pub dropped_malformed: usize,
    /// Rows whose category is neither `ham` nor `spam`
    pub dropped_unknown_label: usize,
    /// Rows whose text is missing or empty after normalization.
    ///
    /// Text that normalizes to nothing (`"!!! 123"`) carries no features, so such
    /// rows are dropped in strict mode too instead of being kept as `""`.
    /// Only a missing text field is an error under strict mode.
    pub dropped_empty_text: usize,
}

impl LoadStats {
    pub fn dropped(&self) -> usize {
        self.dropped_malformed + self.dropped_unknown_label + self.dropped_empty_text
    }
}

/// Ordered collection of records, in file order
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<Record>,
    stats: LoadStats,
}

/// Disjoint training and test subsets
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Vec<Record>,
    pub test: Vec<Record>,
}

impl Corpus {
    pub fn new(records: Vec<Record>, stats: LoadStats) -> Self {
        Self { records, stats }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` records
    pub fn preview(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Number of records per label, `(ham, spam)`
    pub fn label_counts(&self) -> (usize, usize) {
        let spam = self.records.iter().filter(|r| r.label.is_spam()).count();
        (self.records.len() - spam, spam)
    }

    /// Shuffle once with a seeded RNG and cut off `ceil(n * test_size)` test records.
    ///
    /// The same corpus and seed always produce the same split.
    pub fn split(&self, test_size: f64, seed: u64) -> Result<Split> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(SpamError::InsufficientData(format!(
                "test fraction must be in (0, 1), got {}",
                test_size
            )));
        }

        let n = self.records.len();
        let n_test = (n as f64 * test_size).ceil() as usize;
        if n_test >= n {
            return Err(SpamError::InsufficientData(format!(
                "{} record(s) leave no training data with test fraction {}",
                n, test_size
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        let pick = |idx: &[usize]| -> Vec<Record> {
            idx.iter().map(|&i| self.records[i].clone()).collect()
        };

        Ok(Split {
            train: pick(train_idx),
            test: pick(test_idx),
        })
    }
}
