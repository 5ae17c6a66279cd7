//! TF-IDF vectorizer
//!
//! [`TfidfVectorizer`] is a one-shot builder: [`TfidfVectorizer::fit`]
//! consumes it and returns a [`TfidfModel`] whose vocabulary and idf weights
//! are frozen. Only the training texts ever reach `fit`; test and user texts
//! go through [`TfidfModel::transform`], which takes `&self`.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::stop_words::StopWords;
use super::vector::SparseVector;
use crate::error::{Result, SpamError};
use crate::text::tokenize;

/// Vectorizer configuration, consumed by `fit`
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    stop_words: StopWords,
}

/// Fitted vocabulary and inverse document frequencies
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stop_words: StopWords,
}

impl TfidfVectorizer {
    /// Default: 5000 features, English stop words
    pub fn new() -> Self {
        Self {
            max_features: 5000,
            stop_words: StopWords::english(),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features.max(1);
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Learn the vocabulary and idf weights from training documents.
    ///
    /// When more than `max_features` terms survive stop-word removal, the
    /// terms with the highest total count are kept (ties go to the
    /// alphabetically smaller term). Feature indices follow alphabetical
    /// order of the kept terms.
    pub fn fit<S: AsRef<str>>(self, documents: &[S]) -> Result<TfidfModel> {
        let mut term_count: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokenize(doc.as_ref()).filter(|t| !self.stop_words.contains(t)) {
                *term_count.entry(token.to_string()).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_freq.entry(token.to_string()).or_insert(0) += 1;
                }
            }
        }

        if term_count.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, usize)> = term_count.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let pruned = ranked.len().saturating_sub(self.max_features);
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n_documents = documents.len();
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                ((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        debug!(
            "Fitted TF-IDF vocabulary: {} terms from {} documents ({} pruned)",
            terms.len(),
            n_documents,
            pruned
        );

        Ok(TfidfModel {
            vocabulary,
            idf,
            stop_words: self.stop_words,
        })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfModel {
    /// Feature vector for `text`: term count × idf, L2-normalised.
    ///
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text).filter(|t| !self.stop_words.contains(t)) {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let mut vector = SparseVector::from_entries(self.vocabulary_size(), entries);
        vector.l2_normalize();
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|i| self.idf[i])
    }

    pub fn idf_weights(&self) -> &[f64] {
        &self.idf
    }
}
