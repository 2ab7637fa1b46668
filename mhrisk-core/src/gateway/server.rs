//! Router assembly and the serve loop shared by both front-ends.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;

use super::render::Renderer;
use super::{GatewayConfig, api, dashboard, form};
use crate::error::{CoreError, Result};
use mhrisk_ml::{ModelHandle, Predictor};

/// Immutable state cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub renderer: Arc<Renderer>,
    pub started_at: chrono::DateTime<Utc>,
}

impl AppState {
    /// Compile the templates and wrap the model handle.
    pub fn new(model: ModelHandle) -> Result<Self> {
        Ok(Self {
            predictor: Arc::new(Predictor::new(model)),
            renderer: Arc::new(Renderer::new()?),
            started_at: Utc::now(),
        })
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_ready()
    }

    /// Uptime in seconds since the state was created.
    pub fn uptime_secs(&self) -> u64 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_seconds().max(0) as u64
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// `/api/predict`, `/api/schema` and `/health`, mounted on both front-ends.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/predict", post(api::predict))
        .route("/api/schema", get(api::schema))
        .route("/health", get(health_handler))
}

/// The request/response web form.
pub fn form_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::show).post(form::submit))
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The interactive dashboard.
pub fn dashboard_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/predict", post(dashboard::predict))
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "model_loaded": state.model_loaded(),
        "uptime_secs": state.uptime_secs(),
    });
    axum::Json(body)
}

/// Bind the configured address and serve `app` until Ctrl-C.
pub async fn serve(config: &GatewayConfig, app: Router) -> Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
