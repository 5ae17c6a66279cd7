//! Accuracy, confusion matrix and per-class classification report

use serde::Serialize;
use std::fmt;

use crate::dataset::Label;

/// 2x2 confusion matrix, rows = truth, columns = prediction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_ham: usize,
    pub false_spam: usize,
    pub false_ham: usize,
    pub true_spam: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[Label], predicted: &[Label]) -> Self {
        let mut matrix = Self::default();
        for (&t, &p) in truth.iter().zip(predicted) {
            match (t, p) {
                (Label::Ham, Label::Ham) => matrix.true_ham += 1,
                (Label::Ham, Label::Spam) => matrix.false_spam += 1,
                (Label::Spam, Label::Ham) => matrix.false_ham += 1,
                (Label::Spam, Label::Spam) => matrix.true_spam += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_ham + self.false_spam + self.false_ham + self.true_spam
    }

    pub fn correct(&self) -> usize {
        self.true_ham + self.true_spam
    }

    /// `(true positives, false positives, false negatives)` treating `label` as positive
    fn counts_for(&self, label: Label) -> (usize, usize, usize) {
        match label {
            Label::Spam => (self.true_spam, self.false_spam, self.false_ham),
            Label::Ham => (self.true_ham, self.false_ham, self.false_spam),
        }
    }
}

/// Precision, recall, F1 and support for one class (or an average)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// Everything computed on the held-out set
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

/// Compare predictions against the truth.
///
/// Metrics with a zero denominator are reported as 0.0.
pub fn evaluate(truth: &[Label], predicted: &[Label]) -> Evaluation {
    let confusion = ConfusionMatrix::from_predictions(truth, predicted);
    let accuracy = ratio(confusion.correct(), confusion.total());

    let classes: Vec<ClassMetrics> = Label::ALL
        .iter()
        .map(|&label| {
            let (tp, fp, fn_) = confusion.counts_for(label);
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            ClassMetrics {
                name: label.as_str().to_string(),
                precision,
                recall,
                f1: f1(precision, recall),
                support: tp + fn_,
            }
        })
        .collect();

    let total: usize = classes.iter().map(|c| c.support).sum();
    let n = classes.len() as f64;
    let macro_avg = ClassMetrics {
        name: "macro avg".to_string(),
        precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
        recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
        f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
        support: total,
    };

    let weighted = |metric: fn(&ClassMetrics) -> f64| {
        if total == 0 {
            0.0
        } else {
            classes
                .iter()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        }
    };
    let weighted_avg = ClassMetrics {
        name: "weighted avg".to_string(),
        precision: weighted(|c: &ClassMetrics| c.precision),
        recall: weighted(|c: &ClassMetrics| c.recall),
        f1: weighted(|c: &ClassMetrics| c.f1),
        support: total,
    };

    Evaluation {
        accuracy,
        confusion,
        report: ClassificationReport {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
        },
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Sum of per-class supports, i.e. the evaluated set size
    pub fn total_support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.name.len())
            .chain(std::iter::once(self.weighted_avg.name.len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for class in &self.classes {
            write_row(f, class, width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total_support()
        )?;
        write_row(f, &self.macro_avg, width)?;
        write_row(f, &self.weighted_avg, width)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, m: &ClassMetrics, width: usize) -> fmt::Result {
    writeln!(
        f,
        "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
        m.name, m.precision, m.recall, m.f1, m.support
    )
}
