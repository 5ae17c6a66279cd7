//! Shared fixtures for integration tests

#![allow(dead_code)]

use spam_rs::config::{DatasetConfig, ModelConfig};
use spam_rs::pipeline::TrainedPipeline;
use std::io::Write;
use tempfile::NamedTempFile;

const SPAM_WORDS: &[&str] = &[
    "free", "prize", "winner", "claim", "cash", "urgent", "txt", "offer", "reward", "bonus",
    "guaranteed", "mobile", "ringtone", "entry",
];

const HAM_WORDS: &[&str] = &[
    "lunch", "meeting", "tomorrow", "dinner", "mum", "home", "later", "office", "movie",
    "tonight", "sorry", "class", "weekend", "coffee",
];

pub const SPAM_COUNT: usize = 25;
pub const HAM_COUNT: usize = 25;

/// Spam message number `i`, as written in the CSV
pub fn spam_message(i: usize) -> String {
    let n = SPAM_WORDS.len();
    format!(
        "{} {} {}!! {} {} now, reply {}",
        SPAM_WORDS[i % n].to_uppercase(),
        SPAM_WORDS[(i + 3) % n],
        SPAM_WORDS[(i + 5) % n],
        SPAM_WORDS[(i + 7) % n],
        SPAM_WORDS[(i + 11) % n],
        80000 + i
    )
}

/// Ham message number `i`, as written in the CSV
pub fn ham_message(i: usize) -> String {
    let n = HAM_WORDS.len();
    format!(
        "Hey, {} {} at {}pm? {} {} :)",
        HAM_WORDS[i % n],
        HAM_WORDS[(i + 2) % n],
        1 + i % 12,
        HAM_WORDS[(i + 6) % n],
        HAM_WORDS[(i + 9) % n]
    )
}

/// CSV with interleaved ham/spam rows plus two rows that get dropped
pub fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Category,Message").unwrap();
    for i in 0..HAM_COUNT.max(SPAM_COUNT) {
        if i < HAM_COUNT {
            writeln!(file, "ham,\"{}\"", ham_message(i)).unwrap();
        }
        if i < SPAM_COUNT {
            writeln!(file, "spam,\"{}\"", spam_message(i)).unwrap();
        }
    }
    writeln!(file, "phishing,\"verify your account\"").unwrap();
    writeln!(file, "spam").unwrap();
    file.flush().unwrap();
    file
}

pub fn dataset_config(file: &NamedTempFile) -> DatasetConfig {
    DatasetConfig {
        path: file.path().to_path_buf(),
        ..DatasetConfig::default()
    }
}

pub fn build_pipeline() -> TrainedPipeline {
    let file = write_dataset();
    TrainedPipeline::build(&dataset_config(&file), &ModelConfig::default()).unwrap()
}
