//! Static page text shared by the form and the dashboard.

pub const TITLE: &str = "Mental Health Risk Predictor in Tech Industry";
pub const PAGE_TITLE: &str = "Mental Health Risk Predictor in Tech";
pub const INTRO: &str = "This application predicts the likelihood of an individual seeking Mental Health Treatment based on survey responses.";
pub const SURVEY_PROMPT: &str = "Please fill out the survey below:";
pub const PREDICT_ACTION: &str = "Predict Mental Health Risk";
pub const MODEL_LOADED: &str = "Model loaded successfully!";
pub const FIX_INPUTS_HINT: &str = "Please ensure all input fields are filled correctly.";

pub const RESOURCES_HEADING: &str = "Supportive Feedback & Resources:";
pub const RESOURCES_INTRO: &str = "Mental health is just as important as physical health. If you or someone you know is struggling, help is available.";

/// A support line or pointer shown under every dashboard result.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Resource {
    pub name: &'static str,
    pub detail: &'static str,
}

pub const RESOURCES: &[Resource] = &[
    Resource {
        name: "National Suicide Prevention Lifeline",
        detail: "Call or text 988 (US)",
    },
    Resource {
        name: "Crisis Text Line",
        detail: "Text HOME to 741741",
    },
    Resource {
        name: "The Trevor Project",
        detail: "1-866-488-7386 (for LGBTQ youth)",
    },
    Resource {
        name: "Find a Therapist",
        detail: "Psychology Today, SAMHSA National Helpline (1-800-662-HELP)",
    },
    Resource {
        name: "Workplace Resources",
        detail: "Check with your HR department for Employee Assistance Programs (EAPs) or mental health benefits.",
    },
];

pub const DISCLAIMER: &str = "Disclaimer: This tool is for informational purposes only and does not constitute medical advice. Always consult with a qualified healthcare professional for any health concerns.";

/// Dashboard error line; the form uses the prediction error's own text.
pub fn dashboard_error(cause: &str) -> String {
    format!("An error occurred during prediction: {cause}")
}
