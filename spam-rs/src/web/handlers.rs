//! Request handlers for the HTML page and the JSON API

use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::evaluation::{ClassMetrics, ConfusionMatrix};
use crate::pipeline::TrainingSummary;
use crate::shell::{Overview, Shell, ShellResponse};

/// Shared application state
pub struct AppState {
    pub shell: Shell,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    title: String,
    preview: Vec<PreviewRow>,
    total_records: usize,
    accuracy: String,
    report: String,
    input: String,
    message: String,
    /// "warning", "spam" or "ham"; empty when nothing was submitted
    message_kind: String,
    probability: String,
}

struct PreviewRow {
    index: usize,
    label: u8,
    text: String,
}

impl IndexTemplate {
    fn from_overview(overview: Overview) -> Self {
        Self {
            title: overview.title.to_string(),
            preview: overview
                .preview
                .into_iter()
                .enumerate()
                .map(|(index, r)| PreviewRow {
                    index,
                    label: r.label.code(),
                    text: r.text,
                })
                .collect(),
            total_records: overview.total_records,
            accuracy: overview.accuracy,
            report: overview.report,
            input: String::new(),
            message: String::new(),
            message_kind: String::new(),
            probability: String::new(),
        }
    }
}

/// Classify form submission
#[derive(Debug, Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    pub text: String,
}

/// JSON classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: String,
}

/// JSON classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub label: String,
    pub is_spam: bool,
    pub verdict: String,
    pub spam_probability: f64,
    pub normalized_text: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub classes: Vec<ClassMetrics>,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub report: String,
    pub training: TrainingSummary,
}

// Main page (GET)
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    IndexTemplate::from_overview(state.shell.overview())
}

// Classify form submission (POST)
pub async fn classify_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> impl IntoResponse {
    let mut page = IndexTemplate::from_overview(state.shell.overview());
    let response = state.shell.submit(&form.text);

    page.message = response.message();
    match response {
        ShellResponse::Warning(_) => {
            page.message_kind = "warning".to_string();
        }
        ShellResponse::Verdict(prediction) => {
            page.message_kind = prediction.label.as_str().to_string();
            page.probability = format!("{:.2}", prediction.spam_probability);
        }
    }
    page.input = form.text;
    page
}

/// POST /api/classify
pub async fn api_classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Response {
    match state.shell.submit(&req.text) {
        ShellResponse::Verdict(prediction) => (
            StatusCode::OK,
            Json(ClassifyResponse {
                label: prediction.label.as_str().to_string(),
                is_spam: prediction.is_spam(),
                verdict: prediction.verdict().to_string(),
                spam_probability: prediction.spam_probability,
                normalized_text: prediction.normalized_text,
            }),
        )
            .into_response(),
        ShellResponse::Warning(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(&msg)),
        )
            .into_response(),
    }
}

/// GET /api/metrics
pub async fn api_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pipeline = state.shell.pipeline();
    let evaluation = pipeline.evaluation();

    Json(MetricsResponse {
        accuracy: evaluation.accuracy,
        confusion: evaluation.confusion,
        classes: evaluation.report.classes.clone(),
        macro_avg: evaluation.report.macro_avg.clone(),
        weighted_avg: evaluation.report.weighted_avg.clone(),
        report: evaluation.report.to_string(),
        training: pipeline.summary().clone(),
    })
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pipeline = state.shell.pipeline();

    Json(serde_json::json!({
        "status": "healthy",
        "records": pipeline.corpus().len(),
        "vocabulary_size": pipeline.vectorizer().vocabulary_size(),
        "accuracy": pipeline.evaluation().accuracy,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
