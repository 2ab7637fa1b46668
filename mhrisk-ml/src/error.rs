//! Error types for the mhrisk-ml crate.

use std::path::PathBuf;
use thiserror::Error;

/// Low-level error type for record building, artifact loading and inference.
#[derive(Debug, Error)]
pub enum MlError {
    #[error("Model file not found: {}", path.display())]
    ModelUnavailable { path: PathBuf },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MlError {
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}

/// The two failure kinds a prediction can end in.
///
/// Both render directly as the message shown to the respondent.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model file not found. Please ensure '{file}' is in the same directory.")]
    ModelUnavailable { file: String },

    #[error("Error during prediction: {0}")]
    InferenceFailure(#[from] MlError),
}

impl PredictionError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }

    /// The underlying cause without the "Error during prediction" prefix.
    pub fn cause(&self) -> String {
        match self {
            Self::ModelUnavailable { .. } => self.to_string(),
            Self::InferenceFailure(e) => e.to_string(),
        }
    }
}
