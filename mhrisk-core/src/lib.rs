//! # mhrisk-core
//!
//! Configuration, page content and the two HTTP front-ends (web form and
//! dashboard) built on top of `mhrisk-ml`.

pub mod config;
pub mod content;
pub mod error;
pub mod gateway;

pub use config::{AppConfig, ModelConfig, load_config};
pub use error::{ConfigError, CoreError, Result};
pub use gateway::{
    AppState, GatewayConfig, Renderer, api_router, dashboard_router, form_router, serve,
};
