//! L2-regularised logistic regression
//!
//! Fitting is delegated to `linfa-logistic`, which minimises
//! `sum(logloss) + 0.5 * alpha * ||w||^2` with L-BFGS. With `alpha = 1 / C`
//! that has the same minimiser as `C * sum(logloss) + 0.5 * ||w||^2`. The
//! intercept is not regularised.

use linfa::prelude::*;
use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::dataset::Label;
use crate::error::{Result, SpamError};
use crate::features::SparseVector;

/// Training configuration
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    max_iter: usize,
    c: f64,
    tolerance: f64,
}

/// Fitted weights and bias, oriented so that a positive decision means spam
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Vec<f64>,
    bias: f64,
    converged: bool,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            max_iter: 1000,
            c: 1.0,
            tolerance: 1e-4,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Inverse regularisation strength; larger means weaker regularisation
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fit on `features` (all of length `dimension`) and their labels.
    ///
    /// Both classes must be present.
    pub fn fit(
        &self,
        features: &[SparseVector],
        labels: &[Label],
        dimension: usize,
    ) -> Result<LogisticModel> {
        if features.len() != labels.len() {
            return Err(SpamError::InsufficientData(format!(
                "{} feature vectors for {} labels",
                features.len(),
                labels.len()
            )));
        }
        let spam = labels.iter().filter(|l| l.is_spam()).count();
        if spam == 0 || spam == labels.len() {
            return Err(SpamError::InsufficientData(
                "training data must contain both ham and spam messages".to_string(),
            ));
        }
        if !(self.c > 0.0) {
            return Err(SpamError::Model(format!("C must be > 0, got {}", self.c)));
        }

        let x = densify(features, dimension);
        let y: Array1<bool> = labels.iter().map(|l| l.is_spam()).collect();
        let dataset = Dataset::new(x, y);

        let fitted = linfa_logistic::LogisticRegression::default()
            .alpha(1.0 / self.c)
            .max_iterations(self.max_iter as u64)
            .gradient_tolerance(self.tolerance)
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| SpamError::Model(e.to_string()))?;

        // linfa picks which class is "positive"; flip so that spam is
        let sign = if fitted.labels().pos.class { 1.0 } else { -1.0 };
        let weights: Vec<f64> = fitted.params().iter().map(|w| sign * w).collect();
        let bias = sign * fitted.intercept();

        let gradient_norm = gradient_norm(features, labels, &weights, bias, 1.0 / self.c);
        let converged = gradient_norm <= self.tolerance;
        if converged {
            debug!(
                "Logistic regression converged (gradient norm {:.2e})",
                gradient_norm
            );
        } else {
            warn!(
                "Logistic regression did not converge within {} iterations (gradient norm {:.2e})",
                self.max_iter, gradient_norm
            );
        }

        Ok(LogisticModel {
            weights,
            bias,
            converged,
        })
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticModel {
    /// Raw decision value `w·x + b`
    pub fn decision_function(&self, features: &SparseVector) -> f64 {
        features
            .iter()
            .filter(|&(i, _)| i < self.weights.len())
            .map(|(i, v)| v * self.weights[i])
            .sum::<f64>()
            + self.bias
    }

    /// Probability that the message is spam
    pub fn predict_proba(&self, features: &SparseVector) -> f64 {
        sigmoid(self.decision_function(features))
    }

    pub fn predict(&self, features: &SparseVector) -> Label {
        if self.decision_function(features) > 0.0 {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    pub fn predict_all(&self, features: &[SparseVector]) -> Vec<Label> {
        features.iter().map(|f| self.predict(f)).collect()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Whether the solver reached the gradient tolerance
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Dense `n x dimension` design matrix for the solver
fn densify(features: &[SparseVector], dimension: usize) -> Array2<f64> {
    let mut x = Array2::zeros((features.len(), dimension));
    for (row, vector) in features.iter().enumerate() {
        for (col, value) in vector.iter().filter(|&(col, _)| col < dimension) {
            x[[row, col]] = value;
        }
    }
    x
}

/// L2 norm of the gradient of `sum(logloss) + 0.5 * alpha * ||w||^2`
fn gradient_norm(
    features: &[SparseVector],
    labels: &[Label],
    weights: &[f64],
    bias: f64,
    alpha: f64,
) -> f64 {
    let mut grad: Vec<f64> = weights.iter().map(|w| alpha * w).collect();
    let grad_len = grad.len();
    let mut grad_bias = 0.0;
    for (x, label) in features.iter().zip(labels) {
        let target = f64::from(label.code());
        let residual = sigmoid(x.dot(weights) + bias) - target;
        for (i, v) in x.iter().filter(|&(i, _)| i < grad_len) {
            grad[i] += residual * v;
        }
        grad_bias += residual;
    }
    (grad.iter().map(|g| g * g).sum::<f64>() + grad_bias * grad_bias).sqrt()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
