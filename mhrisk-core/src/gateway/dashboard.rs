//! Dashboard handlers.
//!
//! `GET /` shows the widgets at their defaults. `POST /predict` is the
//! explicit predict action; it keeps the submitted widget values on the
//! re-rendered page.

use std::collections::HashMap;

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};

use super::form::read_and_predict;
use super::server::AppState;
use crate::error::Result;
use mhrisk_ml::{AgePolicy, SurveyAnswers};

pub(super) async fn show(State(state): State<AppState>) -> Result<Html<String>> {
    let answers = SurveyAnswers::dashboard_defaults();
    Ok(Html(state.renderer.dashboard_page(
        &answers,
        state.model_loaded(),
        None,
    )?))
}

pub(super) async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>> {
    let (answers, outcome) = read_and_predict(&state, payload, AgePolicy::dashboard());
    Ok(Html(state.renderer.dashboard_page(
        &answers,
        state.model_loaded(),
        Some(&outcome),
    )?))
}
