//! # mhrisk-ml — survey inference for mhrisk
//!
//! Turns 24 survey answers into a single-row record, runs it through a
//! pre-trained forest pipeline loaded once at start-up, and buckets the
//! positive-class probability into Low / Medium / High.
//!
//! The flow is linear: [`record::RecordBuilder`] → [`pipeline::Pipeline`] →
//! [`risk::classify`], wrapped by [`inference::Predictor`].

pub mod error;
pub mod inference;
pub mod pipeline;
pub mod record;
pub mod risk;
pub mod survey;

pub use error::{MlError, PredictionError};
pub use inference::Predictor;
pub use pipeline::{
    ClassProbabilities, DEFAULT_MODEL_FILE, ForestPipeline, MissingModelPolicy, ModelHandle,
    Pipeline,
};
pub use record::{AgePolicy, CellValue, RecordBuilder, SurveyAnswers, SurveyRecord};
pub use risk::{RiskAssessment, RiskLevel, classify};
pub use survey::{FieldSpec, SURVEY_FIELDS, Section, Widget};
