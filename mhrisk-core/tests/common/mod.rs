//! Helpers shared by the gateway integration tests.

#![allow(dead_code)]

use axum::body::Body;
use mhrisk_ml::{ClassProbabilities, MlError, Pipeline, SurveyAnswers, SurveyRecord};

/// A pipeline that always returns the same positive-class probability.
pub struct FixedPipeline(pub f64);

impl Pipeline for FixedPipeline {
    fn predict_proba(&self, _record: &SurveyRecord) -> Result<ClassProbabilities, MlError> {
        Ok(ClassProbabilities(vec![1.0 - self.0, self.0]))
    }
}

/// `application/x-www-form-urlencoded` body for a set of answers.
pub fn form_body(answers: &SurveyAnswers) -> String {
    let json = serde_json::to_value(answers).unwrap();
    json.as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(v.as_str().unwrap())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub fn form_request(uri: &str, answers: &SurveyAnswers) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_body(answers)))
        .unwrap()
}
