//! Integration tests for the HTML page and JSON API

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use spam_rs::shell::Shell;
use spam_rs::web::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let shell = Shell::new(Arc::new(common::build_pipeline()), 10);
    router(Arc::new(AppState { shell }))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/classify")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_index_page() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Spam Email Classifier (Logistic Regression)"));
    assert!(html.contains("Dataset Overview"));
    assert!(html.contains("Accuracy: "));
    assert!(html.contains("weighted avg"));
    assert!(html.contains("Classify"));
    assert!(!html.contains("class=\"alert alert-"));
}

#[tokio::test]
async fn test_blank_form_shows_warning() {
    let response = app().oneshot(form_post("text=+++")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("class=\"alert alert-warning\""));
    assert!(html.contains("Please enter some text."));
    assert!(!html.contains("This email is"));
}

#[tokio::test]
async fn test_missing_form_field_shows_warning() {
    let response = app().oneshot(form_post("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Please enter some text."));
}

#[tokio::test]
async fn test_spam_form_submission() {
    let response = app()
        .oneshot(form_post("text=FREE+prize+winner%21%21+claim+cash+reply+80001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("class=\"alert alert-spam\""));
    assert!(html.contains("This email is SPAM!"));
    assert!(html.contains("spam probability"));
}

#[tokio::test]
async fn test_ham_form_submission() {
    let response = app()
        .oneshot(form_post("text=Hey+lunch+tomorrow+at+the+office%3F+coffee+later"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("class=\"alert alert-ham\""));
    assert!(html.contains("This email is Not Spam."));
}

#[tokio::test]
async fn test_api_classify() {
    let response = app()
        .oneshot(json_post(
            "/api/classify",
            serde_json::json!({ "text": "URGENT! claim your free cash bonus, reply now" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["is_spam"], true);
    assert_eq!(body["verdict"], "SPAM");
    assert_eq!(body["label"], "spam");
    assert_eq!(
        body["normalized_text"],
        "urgent claim your free cash bonus reply now"
    );
}

#[tokio::test]
async fn test_api_blank_input_rejected() {
    let response = app()
        .oneshot(json_post("/api/classify", serde_json::json!({ "text": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Please enter some text.");
}

#[tokio::test]
async fn test_api_metrics() {
    let response = app()
        .oneshot(Request::builder().uri("/api/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let accuracy = body["accuracy"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(body["classes"].as_array().unwrap().len(), 2);
    assert_eq!(body["training"]["test_size"], 10);
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records"], 50);
}
