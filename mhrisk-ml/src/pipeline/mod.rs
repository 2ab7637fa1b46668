//! Inference pipeline abstraction and its concrete forest artifact.

pub mod forest;
pub mod loader;

pub use forest::{ColumnEncoder, ForestPipeline, TreeNode};
pub use loader::{DEFAULT_MODEL_FILE, MissingModelPolicy, ModelHandle, load_pipeline};

use crate::error::MlError;
use crate::record::SurveyRecord;

/// Index of the positive class ("would seek treatment") in the probability row.
pub const POSITIVE_CLASS: usize = 1;

/// A pre-built, immutable classification pipeline.
///
/// Implementations take one record and return one row of class
/// probabilities. They are shared read-only across request handlers.
pub trait Pipeline: Send + Sync {
    fn predict_proba(&self, record: &SurveyRecord) -> Result<ClassProbabilities, MlError>;

    /// Short description for logs and the health endpoint.
    fn describe(&self) -> String {
        "pipeline".to_string()
    }
}

/// One row of class probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities(pub Vec<f64>);

impl ClassProbabilities {
    /// The positive-class probability, checked to be a number in [0, 1].
    pub fn positive(&self) -> Result<f64, MlError> {
        let p = *self.0.get(POSITIVE_CLASS).ok_or_else(|| {
            MlError::inference(format!(
                "model returned {} class(es); a positive class is required",
                self.0.len()
            ))
        })?;
        if !(0.0..=1.0).contains(&p) {
            return Err(MlError::inference(format!(
                "model returned probability {p} outside [0, 1]"
            )));
        }
        Ok(p)
    }
}
