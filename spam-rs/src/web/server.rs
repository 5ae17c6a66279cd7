//! Web server - HTML front-end and JSON API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{self, AppState};
use crate::shell::Shell;

/// Web server configuration
pub struct WebServer {
    state: Arc<AppState>,
    addr: String,
}

impl WebServer {
    /// Create a new web server around an already trained shell
    pub fn new(shell: Shell, addr: String) -> Self {
        Self {
            state: Arc::new(AppState { shell }),
            addr,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the web server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting web server on http://{}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Router over the given state
pub fn router(state: Arc<AppState>) -> Router {
    // Web routes (HTML pages)
    let web_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/classify", post(handlers::classify_submit));

    // JSON API routes
    let api_routes = Router::new()
        .route("/classify", post(handlers::api_classify))
        .route("/metrics", get(handlers::api_metrics));

    Router::new()
        .merge(web_routes)
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
