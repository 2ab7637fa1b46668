//! Risk tiers: the fixed threshold policy over the positive-class probability.

use serde::{Deserialize, Serialize};

/// Probabilities at or above this are High.
pub const HIGH_THRESHOLD: f64 = 0.7;
/// Probabilities at or above this (and below [`HIGH_THRESHOLD`]) are Medium.
pub const MEDIUM_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Alert style the dashboard uses for the headline.
    pub fn tone(&self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Medium => "warning",
            RiskLevel::High => "error",
        }
    }

    /// Alert style for the guidance paragraph under the headline.
    pub fn guidance_tone(&self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Medium => "info",
            RiskLevel::High => "warning",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "Based on your inputs, there is a high likelihood that you might benefit from mental health treatment. Please consider seeking support."
            }
            RiskLevel::Medium => {
                "Your responses suggest a medium likelihood of benefiting from mental health treatment. It might be helpful to explore available resources."
            }
            RiskLevel::Low => {
                "Your responses indicate a low likelihood of needing mental health treatment. Continue to prioritize your well-being!"
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a probability. Boundaries belong to the more severe tier.
pub fn classify(probability: f64) -> RiskLevel {
    if probability >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if probability >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Format a probability as a two-decimal percentage, e.g. `85.00%`.
pub fn format_confidence(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// The outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub level: RiskLevel,
}

impl RiskAssessment {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            level: classify(probability),
        }
    }

    /// The raw probability rendered as a percentage; not a calibrated confidence.
    pub fn confidence(&self) -> String {
        format_confidence(self.probability)
    }

    pub fn headline(&self) -> String {
        format!(
            "Predicted Mental Health Risk: {} (Confidence: {})",
            self.level,
            self.confidence()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.4), RiskLevel::Medium);
        assert_eq!(classify(0.7), RiskLevel::High);
        assert_eq!(classify(0.399_999), RiskLevel::Low);
        assert_eq!(classify(0.699_999), RiskLevel::Medium);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0.0), RiskLevel::Low);
        assert_eq!(classify(1.0), RiskLevel::High);
    }

    #[test]
    fn test_confidence_format() {
        assert_eq!(format_confidence(0.85), "85.00%");
        assert_eq!(format_confidence(0.55), "55.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.125), "12.50%");
    }

    #[test]
    fn test_headline() {
        let a = RiskAssessment::from_probability(0.85);
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(
            a.headline(),
            "Predicted Mental Health Risk: High (Confidence: 85.00%)"
        );
    }

    #[test]
    fn test_tones_by_level() {
        assert_eq!(RiskLevel::High.tone(), "error");
        assert_eq!(RiskLevel::Medium.tone(), "warning");
        assert_eq!(RiskLevel::Low.tone(), "success");
        assert!(RiskLevel::Medium.guidance().contains("medium likelihood"));
    }

    #[test]
    fn test_level_serializes_as_name() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }
}
