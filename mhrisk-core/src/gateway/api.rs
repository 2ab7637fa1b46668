//! JSON endpoints for scripted clients.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use super::server::AppState;
use mhrisk_ml::{AgePolicy, MlError, PredictionError, SURVEY_FIELDS, SurveyAnswers};

#[derive(Debug, Serialize)]
pub(super) struct PredictResponse {
    prediction: String,
    risk_level: &'static str,
    confidence: String,
    probability: f64,
}

/// A body that is not a JSON object of answers is an inference failure
/// like any other malformed input.
pub(super) async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<SurveyAnswers>, JsonRejection>,
) -> impl IntoResponse {
    let answers = match payload {
        Ok(Json(answers)) => answers,
        Err(rejection) => {
            tracing::info!(status = %rejection.status(), "Prediction body rejected");
            let err: PredictionError = MlError::invalid_input(rejection.body_text()).into();
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": err.to_string() })),
            );
        }
    };

    match state.predictor.predict(&answers, AgePolicy::dashboard()) {
        Ok(assessment) => {
            let body = PredictResponse {
                prediction: assessment.headline(),
                risk_level: assessment.level.as_str(),
                confidence: assessment.confidence(),
                probability: assessment.probability,
            };
            (StatusCode::OK, Json(serde_json::json!(body)))
        }
        Err(err) => {
            let status = match &err {
                PredictionError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                PredictionError::InferenceFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            };
            (status, Json(serde_json::json!({ "error": err.to_string() })))
        }
    }
}

/// The survey field table: column, label, options, widget, section.
pub(super) async fn schema() -> impl IntoResponse {
    Json(&SURVEY_FIELDS[..])
}
