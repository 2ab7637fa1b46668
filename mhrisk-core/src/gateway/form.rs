//! Web form handlers: one page, re-rendered with the outcome of each POST.

use std::collections::HashMap;

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};

use super::render::Outcome;
use super::server::AppState;
use crate::error::Result;
use mhrisk_ml::{AgePolicy, MlError, PredictionError, SurveyAnswers};

pub(super) async fn show(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.renderer.form_page(None, None)?))
}

/// Failures are page content; the status stays 200.
pub(super) async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>> {
    let (answers, outcome) = read_and_predict(&state, payload, AgePolicy::Unbounded);
    if let Err(e) = &outcome {
        tracing::info!(unavailable = e.is_unavailable(), "Form prediction failed");
    }
    Ok(Html(state.renderer.form_page(Some(&answers), Some(&outcome))?))
}

/// Decode a urlencoded submission and run it. An undecodable body becomes an
/// inference failure over empty answers.
pub(super) fn read_and_predict(
    state: &AppState,
    payload: std::result::Result<Form<HashMap<String, String>>, FormRejection>,
    age_policy: AgePolicy,
) -> (SurveyAnswers, Outcome) {
    match payload {
        Ok(Form(fields)) => {
            let answers: SurveyAnswers = fields.into_iter().collect();
            let outcome = state.predictor.predict(&answers, age_policy);
            (answers, outcome)
        }
        Err(rejection) => {
            tracing::info!(status = %rejection.status(), "Submission body rejected");
            let err = PredictionError::from(MlError::invalid_input(rejection.body_text()));
            (SurveyAnswers::new(), Err(err))
        }
    }
}
