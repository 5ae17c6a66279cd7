//! Web front-end
//!
//! Server-rendered page mirroring the interactive shell, plus a small JSON API.

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{router, WebServer};
