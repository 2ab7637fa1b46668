//! # HTTP Gateway
//!
//! Serves the two front-ends over axum: the request/response web form and
//! the interactive dashboard. Both share the JSON API and health routes and
//! the same read-only [`AppState`].

mod api;
mod dashboard;
mod form;
mod render;
mod server;

pub use render::{Outcome, Renderer};
pub use server::{AppState, api_router, dashboard_router, form_router, serve};

use serde::{Deserialize, Serialize};

use mhrisk_ml::MissingModelPolicy;

/// Configuration for one front-end server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Start-up behaviour when the model artifact is missing.
    pub missing_model: MissingModelPolicy,
}

impl GatewayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
