//! Trained pipeline
//!
//! [`TrainedPipeline::build`] runs the one-time steps (load, clean, split,
//! fit, evaluate). [`TrainedPipeline::classify`] is the repeatable per-request
//! step and only reads the frozen vectorizer and model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::config::{DatasetConfig, ModelConfig};
use crate::dataset::{Corpus, DatasetLoader, Label, Record};
use crate::error::{Result, SpamError};
use crate::evaluation::{evaluate, Evaluation};
use crate::features::{StopWords, TfidfModel, TfidfVectorizer};
use crate::model::{LogisticModel, LogisticRegression};
use crate::text::normalize;

/// Outcome of classifying one message
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of spam in [0, 1]
    pub spam_probability: f64,
    pub normalized_text: String,
}

impl Prediction {
    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }

    /// "SPAM" or "Not Spam"
    pub fn verdict(&self) -> &'static str {
        self.label.verdict()
    }
}

/// Sizes and timings recorded while building
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub converged: bool,
    pub build_millis: u128,
    pub built_at: DateTime<Utc>,
}

/// Immutable vectorizer + model + held-out evaluation
pub struct TrainedPipeline {
    corpus: Corpus,
    vectorizer: TfidfModel,
    model: LogisticModel,
    evaluation: Evaluation,
    summary: TrainingSummary,
}

impl TrainedPipeline {
    /// Load the dataset from disk and train
    pub fn build(dataset: &DatasetConfig, model: &ModelConfig) -> Result<Self> {
        let corpus = DatasetLoader::new(&dataset.path)
            .strict(dataset.strict)
            .load()?;
        Self::train(corpus, dataset, model)
    }

    /// Train on an already loaded corpus
    pub fn train(corpus: Corpus, dataset: &DatasetConfig, model: &ModelConfig) -> Result<Self> {
        let started = Instant::now();

        let split = corpus.split(dataset.test_size, dataset.seed)?;
        let train_texts: Vec<&str> = split.train.iter().map(|r| r.text.as_str()).collect();
        let train_labels: Vec<Label> = split.train.iter().map(|r| r.label).collect();

        let vectorizer = TfidfVectorizer::new()
            .with_max_features(model.max_features)
            .with_stop_words(StopWords::english())
            .fit(&train_texts)?;

        let train_features = vectorizer.transform_all(&train_texts);
        let classifier = LogisticRegression::new()
            .with_max_iter(model.max_iter)
            .with_c(model.c)
            .with_tolerance(model.tolerance)
            .fit(
                &train_features,
                &train_labels,
                vectorizer.vocabulary_size(),
            )?;

        let test_features: Vec<_> = split
            .test
            .iter()
            .map(|r| vectorizer.transform(&r.text))
            .collect();
        let test_labels: Vec<Label> = split.test.iter().map(|r| r.label).collect();
        let evaluation = evaluate(&test_labels, &classifier.predict_all(&test_features));

        let summary = TrainingSummary {
            train_size: split.train.len(),
            test_size: split.test.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            converged: classifier.converged(),
            build_millis: started.elapsed().as_millis(),
            built_at: Utc::now(),
        };

        info!(
            "Model trained: {} train / {} test records, {} features, accuracy {:.2}",
            summary.train_size, summary.test_size, summary.vocabulary_size, evaluation.accuracy
        );

        Ok(Self {
            corpus,
            vectorizer,
            model: classifier,
            evaluation,
            summary,
        })
    }

    /// Normalize, vectorize and classify one message.
    ///
    /// Blank input is rejected with [`SpamError::EmptyUserInput`].
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(SpamError::EmptyUserInput);
        }

        let normalized_text = normalize(text);
        let features = self.vectorizer.transform(&normalized_text);
        Ok(Prediction {
            label: self.model.predict(&features),
            spam_probability: self.model.predict_proba(&features),
            normalized_text,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn preview(&self, rows: usize) -> &[Record] {
        self.corpus.preview(rows)
    }

    pub fn vectorizer(&self) -> &TfidfModel {
        &self.vectorizer
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }
}
