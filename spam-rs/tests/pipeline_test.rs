//! Integration tests for the build-once / classify-many pipeline

mod common;

use common::{build_pipeline, dataset_config, spam_message, write_dataset, HAM_COUNT, SPAM_COUNT};
use spam_rs::config::{DatasetConfig, ModelConfig};
use spam_rs::dataset::Label;
use spam_rs::pipeline::TrainedPipeline;
use spam_rs::shell::{Shell, ShellResponse, EMPTY_INPUT_WARNING};
use spam_rs::SpamError;
use std::sync::Arc;

#[test]
fn test_missing_dataset_is_terminal() {
    let config = DatasetConfig {
        path: "/nonexistent/mail_data.csv".into(),
        ..DatasetConfig::default()
    };
    let result = TrainedPipeline::build(&config, &ModelConfig::default());
    match result {
        Err(e @ SpamError::DatasetNotFound(_)) => assert!(e.is_terminal()),
        Err(other) => panic!("expected DatasetNotFound, got {:?}", other),
        Ok(_) => panic!("expected DatasetNotFound, got a pipeline"),
    }
}

#[test]
fn test_invalid_rows_are_dropped() {
    let pipeline = build_pipeline();
    let stats = pipeline.corpus().stats();

    assert_eq!(pipeline.corpus().len(), HAM_COUNT + SPAM_COUNT);
    assert_eq!(stats.dropped_unknown_label, 1);
    assert_eq!(stats.dropped_malformed, 1);
    assert_eq!(pipeline.corpus().label_counts(), (HAM_COUNT, SPAM_COUNT));
}

#[test]
fn test_strict_mode_fails_loudly() {
    let file = write_dataset();
    let config = DatasetConfig {
        strict: true,
        ..dataset_config(&file)
    };
    let result = TrainedPipeline::build(&config, &ModelConfig::default());
    assert!(matches!(result, Err(SpamError::UnknownLabel { .. })));
}

#[test]
fn test_evaluation_bounds_and_supports() {
    let pipeline = build_pipeline();
    let evaluation = pipeline.evaluation();
    let summary = pipeline.summary();

    assert!((0.0..=1.0).contains(&evaluation.accuracy));
    assert_eq!(summary.test_size, 10);
    assert_eq!(summary.train_size, 40);
    assert_eq!(evaluation.report.total_support(), summary.test_size);
    assert_eq!(evaluation.confusion.total(), summary.test_size);
}

#[test]
fn test_build_is_reproducible() {
    let a = build_pipeline();
    let b = build_pipeline();

    assert_eq!(a.evaluation().accuracy, b.evaluation().accuracy);
    assert_eq!(a.evaluation().confusion, b.evaluation().confusion);
    assert_eq!(
        a.vectorizer().vocabulary_size(),
        b.vectorizer().vocabulary_size()
    );
    assert_eq!(a.model().weights(), b.model().weights());
    assert_eq!(a.model().bias(), b.model().bias());
}

#[test]
fn test_verbatim_spam_is_classified_as_spam() {
    let pipeline = build_pipeline();

    for i in 0..SPAM_COUNT {
        let prediction = pipeline.classify(&spam_message(i)).unwrap();
        assert_eq!(prediction.label, Label::Spam, "message {}", i);
        assert_eq!(prediction.verdict(), "SPAM");
        assert!(prediction.spam_probability > 0.5);
    }
}

#[test]
fn test_ham_is_not_spam() {
    let pipeline = build_pipeline();
    let prediction = pipeline
        .classify("Hey, lunch tomorrow at the office? coffee later :)")
        .unwrap();

    assert_eq!(prediction.label, Label::Ham);
    assert_eq!(prediction.verdict(), "Not Spam");
    assert_eq!(
        prediction.normalized_text,
        "hey lunch tomorrow at the office coffee later"
    );
}

#[test]
fn test_blank_input_is_rejected() {
    let pipeline = build_pipeline();
    for input in ["", "   ", "\n\t"] {
        let result = pipeline.classify(input);
        match result {
            Err(e @ SpamError::EmptyUserInput) => assert!(!e.is_terminal()),
            other => panic!("expected EmptyUserInput for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_classification_does_not_touch_vocabulary() {
    let pipeline = build_pipeline();
    let size = pipeline.vectorizer().vocabulary_size();
    let idf = pipeline.vectorizer().idf_weights().to_vec();

    pipeline.classify("zebra xylophone quantum brand new words").unwrap();
    pipeline.classify("free prize winner").unwrap();

    assert_eq!(pipeline.vectorizer().vocabulary_size(), size);
    assert_eq!(pipeline.vectorizer().idf_weights(), idf.as_slice());
    assert!(pipeline.vectorizer().index_of("zebra").is_none());
}

#[test]
fn test_unknown_words_only_still_classify() {
    let pipeline = build_pipeline();
    let prediction = pipeline.classify("zebra xylophone").unwrap();
    assert!((0.0..=1.0).contains(&prediction.spam_probability));
}

#[test]
fn test_shell_blank_submission_warns() {
    let shell = Shell::new(Arc::new(build_pipeline()), 10);

    for input in ["", "   "] {
        match shell.submit(input) {
            ShellResponse::Warning(msg) => assert_eq!(msg, EMPTY_INPUT_WARNING),
            ShellResponse::Verdict(p) => panic!("unexpected verdict {:?}", p),
        }
    }
}

#[test]
fn test_shell_overview() {
    let shell = Shell::new(Arc::new(build_pipeline()), 10);
    let overview = shell.overview();

    assert_eq!(overview.preview.len(), 10);
    assert_eq!(overview.total_records, HAM_COUNT + SPAM_COUNT);
    assert_eq!(overview.accuracy.len(), 4);
    assert!(overview.report.contains("weighted avg"));

    let text = shell.render_overview();
    assert!(text.contains("Dataset Overview"));
    assert!(text.contains(&format!("Accuracy: {}", overview.accuracy)));
}

#[test]
fn test_shell_spam_message() {
    let shell = Shell::new(Arc::new(build_pipeline()), 10);
    let response = shell.submit(&spam_message(3));
    assert_eq!(response.message(), "This email is SPAM!");
}
