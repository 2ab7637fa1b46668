//! The shared inference step: answers in, risk assessment out.

use uuid::Uuid;

use crate::error::PredictionError;
use crate::pipeline::ModelHandle;
use crate::record::{AgePolicy, RecordBuilder, SurveyAnswers};
use crate::risk::RiskAssessment;

/// Runs one prediction per call against the process-wide model handle.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: ModelHandle,
}

impl Predictor {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Build the record, call the model once, and bucket the result.
    ///
    /// The record is built before the model handle is consulted, so
    /// malformed input is reported even when the model is missing.
    pub fn predict(
        &self,
        answers: &SurveyAnswers,
        age_policy: AgePolicy,
    ) -> Result<RiskAssessment, PredictionError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("predict", %request_id);
        let _enter = span.enter();

        let record = RecordBuilder::new(age_policy).build(answers).map_err(|e| {
            tracing::warn!(error = %e, "Survey record rejected");
            e
        })?;

        let pipeline = self
            .model
            .pipeline()
            .ok_or_else(|| PredictionError::ModelUnavailable {
                file: self.model.file_name(),
            })?;

        let probability = pipeline
            .predict_proba(&record)
            .and_then(|probs| probs.positive())
            .map_err(|e| {
                tracing::warn!(error = %e, "Model call failed");
                e
            })?;

        let assessment = RiskAssessment::from_probability(probability);
        tracing::info!(
            level = %assessment.level,
            probability = assessment.probability,
            "Prediction complete"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MlError;
    use crate::pipeline::{ClassProbabilities, Pipeline};
    use crate::record::SurveyRecord;
    use crate::risk::RiskLevel;
    use std::sync::Arc;

    struct FixedPipeline(f64);

    impl Pipeline for FixedPipeline {
        fn predict_proba(&self, _record: &SurveyRecord) -> Result<ClassProbabilities, MlError> {
            Ok(ClassProbabilities(vec![1.0 - self.0, self.0]))
        }
    }

    struct FailingPipeline;

    impl Pipeline for FailingPipeline {
        fn predict_proba(&self, _record: &SurveyRecord) -> Result<ClassProbabilities, MlError> {
            Err(MlError::inference("tree walk exploded"))
        }
    }

    fn predictor(p: Arc<dyn Pipeline>) -> Predictor {
        Predictor::new(ModelHandle::ready(p, "model.json"))
    }

    #[test]
    fn test_high_risk_prediction() {
        let a = predictor(Arc::new(FixedPipeline(0.85)))
            .predict(&SurveyAnswers::dashboard_defaults(), AgePolicy::Unbounded)
            .unwrap();
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(a.confidence(), "85.00%");
    }

    #[test]
    fn test_medium_risk_prediction() {
        let a = predictor(Arc::new(FixedPipeline(0.55)))
            .predict(&SurveyAnswers::dashboard_defaults(), AgePolicy::dashboard())
            .unwrap();
        assert_eq!(a.level, RiskLevel::Medium);
        assert_eq!(a.confidence(), "55.00%");
    }

    #[test]
    fn test_unavailable_model() {
        let p = Predictor::new(ModelHandle::unavailable("random_forest_tuned_model.json"));
        let err = p
            .predict(&SurveyAnswers::dashboard_defaults(), AgePolicy::Unbounded)
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("random_forest_tuned_model.json"));
    }

    #[test]
    fn test_malformed_age_reported_before_missing_model() {
        let p = Predictor::new(ModelHandle::unavailable("random_forest_tuned_model.json"));
        let answers = SurveyAnswers::dashboard_defaults().with("Age", "abc");
        let err = p.predict(&answers, AgePolicy::Unbounded).unwrap_err();
        assert!(!err.is_unavailable());
        assert!(err.to_string().starts_with("Error during prediction:"));
    }

    #[test]
    fn test_pipeline_failure_is_inference_failure() {
        let err = predictor(Arc::new(FailingPipeline))
            .predict(&SurveyAnswers::dashboard_defaults(), AgePolicy::Unbounded)
            .unwrap_err();
        assert!(matches!(err, PredictionError::InferenceFailure(_)));
        assert!(err.to_string().contains("tree walk exploded"));
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let err = predictor(Arc::new(FixedPipeline(1.2)))
            .predict(&SurveyAnswers::dashboard_defaults(), AgePolicy::Unbounded)
            .unwrap_err();
        assert!(matches!(err, PredictionError::InferenceFailure(_)));
    }
}
