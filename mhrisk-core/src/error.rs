//! Error types for mhrisk-core.
//!
//! Uses `thiserror` for the start-up and rendering paths. Prediction
//! failures are not errors at this level: they are rendered into pages.

use std::path::PathBuf;

/// Top-level error type for the core library.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] mhrisk_ml::MlError),

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::RenderError> for CoreError {
    fn from(err: handlebars::RenderError) -> Self {
        CoreError::Render {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::TemplateError> for CoreError {
    fn from(err: handlebars::TemplateError) -> Self {
        CoreError::Render {
            message: err.to_string(),
        }
    }
}

/// A type alias for results using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
