//! HTML rendering with Handlebars.
//!
//! Templates are compiled into the binary and registered once; handlers
//! build a JSON view model and render by name.

use handlebars::Handlebars;
use serde_json::{Value, json};

use crate::content;
use crate::error::Result;
use mhrisk_ml::survey::{self, FieldSpec, Section, Widget};
use mhrisk_ml::{PredictionError, RiskAssessment, SurveyAnswers};

const FORM_TEMPLATE: &str = include_str!("../../templates/form.hbs");
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.hbs");
const HEAD_PARTIAL: &str = include_str!("../../templates/head.hbs");
const RESOURCES_PARTIAL: &str = include_str!("../../templates/resources.hbs");
const SECTION_PARTIAL: &str = include_str!("../../templates/section.hbs");

/// Result of one submission, as the pages see it.
pub type Outcome = std::result::Result<RiskAssessment, PredictionError>;

/// Compiled page templates.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("templates", &self.registry.get_templates().len())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_partial("head", HEAD_PARTIAL)?;
        registry.register_partial("resources", RESOURCES_PARTIAL)?;
        registry.register_partial("section", SECTION_PARTIAL)?;
        registry.register_template_string("form", FORM_TEMPLATE)?;
        registry.register_template_string("dashboard", DASHBOARD_TEMPLATE)?;
        Ok(Self { registry })
    }

    /// The request/response form page. `answers` re-selects submitted values.
    pub fn form_page(
        &self,
        answers: Option<&SurveyAnswers>,
        outcome: Option<&Outcome>,
    ) -> Result<String> {
        let fields: Vec<Value> = survey::SURVEY_FIELDS
            .iter()
            .map(|f| field_view(f, answers.and_then(|a| a.get(f.column))))
            .collect();

        let mut view = json!({
            "title": content::TITLE,
            "page_title": content::PAGE_TITLE,
            "intro": content::INTRO,
            "prompt": content::SURVEY_PROMPT,
            "action": content::PREDICT_ACTION,
            "fields": fields,
        });

        match outcome {
            Some(Ok(assessment)) => {
                view["prediction"] = json!(assessment.headline());
                view["risk_level"] = json!(assessment.level.as_str());
                view["risk_tone"] = json!(assessment.level.tone());
                view["confidence"] = json!(assessment.confidence());
            }
            Some(Err(err)) => {
                view["error"] = json!(err.to_string());
            }
            None => {}
        }

        Ok(self.registry.render("form", &view)?)
    }

    /// The dashboard page. `answers` holds the current widget values.
    pub fn dashboard_page(
        &self,
        answers: &SurveyAnswers,
        model_ready: bool,
        outcome: Option<&Outcome>,
    ) -> Result<String> {
        let sections: Vec<Value> = Section::ALL
            .iter()
            .map(|section| {
                let fields: Vec<Value> = survey::fields_in(*section)
                    .map(|f| field_view(f, answers.get(f.column)))
                    .collect();
                json!({ "title": section.title(), "fields": fields })
            })
            .collect();
        let (left, right) = sections.split_at(1);

        let mut view = json!({
            "title": content::TITLE,
            "page_title": content::PAGE_TITLE,
            "intro": content::INTRO,
            "prompt": content::SURVEY_PROMPT,
            "action": content::PREDICT_ACTION,
            "model_ready": model_ready,
            "model_loaded": content::MODEL_LOADED,
            "left_sections": left,
            "right_sections": right,
            "disclaimer": content::DISCLAIMER,
        });

        match outcome {
            Some(Ok(assessment)) => {
                view["result"] = json!({
                    "headline": format!("Predicted Mental Health Risk: {}", assessment.level),
                    "risk_level": assessment.level.as_str(),
                    "tone": assessment.level.tone(),
                    "confidence": format!("Confidence Score: {}", assessment.confidence()),
                    "guidance": assessment.level.guidance(),
                    "guidance_tone": assessment.level.guidance_tone(),
                });
                view["resources"] = json!({
                    "heading": content::RESOURCES_HEADING,
                    "intro": content::RESOURCES_INTRO,
                    "items": content::RESOURCES,
                });
            }
            Some(Err(err)) if err.is_unavailable() => {
                view["error"] = json!(err.to_string());
            }
            Some(Err(err)) => {
                view["error"] = json!(content::dashboard_error(&err.cause()));
                view["error_hint"] = json!(content::FIX_INPUTS_HINT);
            }
            None => {}
        }

        Ok(self.registry.render("dashboard", &view)?)
    }
}

/// View model for one question. Falls back to the widget default when the
/// respondent has not answered yet.
fn field_view(spec: &FieldSpec, current: Option<&str>) -> Value {
    match spec.widget {
        Widget::Slider { min, max, default } => {
            let value = current.map(str::to_string).unwrap_or_else(|| default.to_string());
            json!({
                "column": spec.column,
                "label": spec.label,
                "slider": true,
                "min": min,
                "max": max,
                "value": value,
            })
        }
        Widget::Select | Widget::Radio => {
            let selected = current.unwrap_or(spec.options[0]);
            let options: Vec<Value> = spec
                .options
                .iter()
                .map(|o| json!({ "value": o, "selected": *o == selected }))
                .collect();
            json!({
                "column": spec.column,
                "label": spec.label,
                "radio": spec.widget == Widget::Radio,
                "options": options,
            })
        }
    }
}
