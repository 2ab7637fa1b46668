//! Process-wide model loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Pipeline;
use super::forest::ForestPipeline;
use crate::error::MlError;

/// Well-known artifact file name, resolved against the working directory.
pub const DEFAULT_MODEL_FILE: &str = "random_forest_tuned_model.json";

/// What to do when the artifact file does not exist at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingModelPolicy {
    /// Keep serving and report the model as unavailable on every prediction.
    PerRequest,
    /// Refuse to start.
    FailStartup,
}

impl std::fmt::Display for MissingModelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingModelPolicy::PerRequest => write!(f, "per_request"),
            MissingModelPolicy::FailStartup => write!(f, "fail_startup"),
        }
    }
}

/// The loaded model, or the record of its absence.
#[derive(Clone)]
pub enum ModelHandle {
    Ready {
        pipeline: Arc<dyn Pipeline>,
        path: PathBuf,
    },
    Unavailable {
        path: PathBuf,
    },
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Ready { pipeline, path } => f
                .debug_struct("Ready")
                .field("pipeline", &pipeline.describe())
                .field("path", path)
                .finish(),
            ModelHandle::Unavailable { path } => {
                f.debug_struct("Unavailable").field("path", path).finish()
            }
        }
    }
}

impl ModelHandle {
    /// Wrap an already-built pipeline.
    pub fn ready(pipeline: Arc<dyn Pipeline>, path: impl Into<PathBuf>) -> Self {
        ModelHandle::Ready {
            pipeline,
            path: path.into(),
        }
    }

    pub fn unavailable(path: impl Into<PathBuf>) -> Self {
        ModelHandle::Unavailable { path: path.into() }
    }

    /// Load the artifact at `path`, applying `policy` if it is missing.
    ///
    /// A file that exists but is not a valid artifact is always an error.
    pub fn load(path: &Path, policy: MissingModelPolicy) -> Result<Self, MlError> {
        match load_pipeline(path) {
            Ok(pipeline) => {
                tracing::info!(path = %path.display(), model = %pipeline.describe(), "Model loaded");
                Ok(Self::ready(pipeline, path))
            }
            Err(MlError::ModelUnavailable { path }) => match policy {
                MissingModelPolicy::PerRequest => {
                    tracing::warn!(
                        path = %path.display(),
                        "Model file not found; predictions will report the model as unavailable"
                    );
                    Ok(Self::unavailable(path))
                }
                MissingModelPolicy::FailStartup => Err(MlError::ModelUnavailable { path }),
            },
            Err(e) => Err(e),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelHandle::Ready { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            ModelHandle::Ready { path, .. } | ModelHandle::Unavailable { path } => path,
        }
    }

    /// File name shown to users when the model is missing.
    pub fn file_name(&self) -> String {
        self.path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path().display().to_string())
    }

    pub fn pipeline(&self) -> Option<&Arc<dyn Pipeline>> {
        match self {
            ModelHandle::Ready { pipeline, .. } => Some(pipeline),
            ModelHandle::Unavailable { .. } => None,
        }
    }
}

/// Read and validate a forest artifact.
pub fn load_pipeline(path: &Path) -> Result<Arc<dyn Pipeline>, MlError> {
    if !path.exists() {
        return Err(MlError::ModelUnavailable {
            path: path.to_path_buf(),
        });
    }
    let pipeline = ForestPipeline::from_path(path)?;
    Ok(Arc::new(pipeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ARTIFACT: &str = r#"{
        "format": "mhrisk-forest",
        "version": 1,
        "classes": ["No", "Yes"],
        "preprocessor": [{ "type": "numeric", "column": "Age", "impute": 30.0 }],
        "trees": [{ "nodes": [{ "value": [1.0, 1.0] }] }]
    }"#;

    #[test]
    fn test_missing_per_request_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_MODEL_FILE);
        let handle = ModelHandle::load(&path, MissingModelPolicy::PerRequest).unwrap();
        assert!(!handle.is_ready());
        assert!(handle.pipeline().is_none());
        assert_eq!(handle.file_name(), DEFAULT_MODEL_FILE);
    }

    #[test]
    fn test_missing_fail_startup_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_MODEL_FILE);
        let err = ModelHandle::load(&path, MissingModelPolicy::FailStartup).unwrap_err();
        assert!(matches!(err, MlError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_loads_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARTIFACT.as_bytes()).unwrap();
        let handle = ModelHandle::load(file.path(), MissingModelPolicy::FailStartup).unwrap();
        assert!(handle.is_ready());
        assert!(format!("{:?}", handle).contains("1 trees"));
    }

    #[test]
    fn test_corrupt_artifact_fails_under_either_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"format\": ").unwrap();
        for policy in [MissingModelPolicy::PerRequest, MissingModelPolicy::FailStartup] {
            let err = ModelHandle::load(file.path(), policy).unwrap_err();
            assert!(matches!(err, MlError::Model(_)));
        }
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: MissingModelPolicy = serde_json::from_str("\"fail_startup\"").unwrap();
        assert_eq!(policy, MissingModelPolicy::FailStartup);
        assert_eq!(MissingModelPolicy::PerRequest.to_string(), "per_request");
    }
}
