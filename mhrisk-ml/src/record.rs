//! Single-row survey record and the builder that marshals raw answers into it.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MlError;
use crate::survey::{self, AGE_MAX, AGE_MIN, STATE_MISSING_SENTINEL};

/// Raw answers as submitted, keyed by column name.
///
/// Deserializes from a JSON object whose values are strings or numbers;
/// numbers are kept in their decimal text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SurveyAnswers(BTreeMap<String, String>);

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style insert, handy for tests and fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The answers a dashboard shows before the respondent touches anything:
    /// the default age and the first option of every other field.
    pub fn dashboard_defaults() -> Self {
        survey::SURVEY_FIELDS
            .iter()
            .map(|f| {
                let value = if f.is_numeric() {
                    survey::AGE_DEFAULT.to_string()
                } else {
                    f.options[0].to_string()
                };
                (f.column.to_string(), value)
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for SurveyAnswers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Answer {
            Text(String),
            Integer(i64),
            Number(f64),
        }

        let raw = BTreeMap::<String, Answer>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(column, answer)| {
                let value = match answer {
                    Answer::Text(v) => v,
                    Answer::Integer(v) => v.to_string(),
                    Answer::Number(v) => v.to_string(),
                };
                (column, value)
            })
            .collect())
    }
}

impl From<BTreeMap<String, String>> for SurveyAnswers {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for SurveyAnswers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single cell of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Category(String),
    /// Absent value; encoders impute it.
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// One survey response, one cell per training-schema column, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRecord {
    cells: Vec<(&'static str, CellValue)>,
}

impl SurveyRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(name, _)| *name)
    }

    pub fn cells(&self) -> &[(&'static str, CellValue)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Bounds applied when parsing Age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AgePolicy {
    /// Any integer; the web form accepts whatever parses.
    #[default]
    Unbounded,
    /// Inclusive range; the dashboard slider.
    Range { min: i64, max: i64 },
}

impl AgePolicy {
    pub fn dashboard() -> Self {
        AgePolicy::Range {
            min: AGE_MIN,
            max: AGE_MAX,
        }
    }

    fn check(&self, age: i64) -> Result<i64, MlError> {
        match *self {
            AgePolicy::Unbounded => Ok(age),
            AgePolicy::Range { min, max } if (min..=max).contains(&age) => Ok(age),
            AgePolicy::Range { min, max } => Err(MlError::invalid_input(format!(
                "Age {age} is outside the accepted range {min}-{max}"
            ))),
        }
    }
}

/// Turns raw answers into a [`SurveyRecord`]. Pure: the same answers always
/// produce the same record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    age_policy: AgePolicy,
}

impl RecordBuilder {
    pub fn new(age_policy: AgePolicy) -> Self {
        Self { age_policy }
    }

    pub fn age_policy(&self) -> AgePolicy {
        self.age_policy
    }

    pub fn build(&self, answers: &SurveyAnswers) -> Result<SurveyRecord, MlError> {
        let mut cells = Vec::with_capacity(survey::SURVEY_FIELDS.len());
        for spec in survey::SURVEY_FIELDS.iter() {
            let raw = answers
                .get(spec.column)
                .ok_or_else(|| MlError::invalid_input(format!("missing field '{}'", spec.column)))?;
            let value = if spec.is_numeric() {
                CellValue::Integer(self.parse_age(raw)?)
            } else if spec.column == "State" {
                encode_state(raw)
            } else {
                CellValue::Category(raw.to_string())
            };
            cells.push((spec.column, value));
        }
        Ok(SurveyRecord { cells })
    }

    fn parse_age(&self, raw: &str) -> Result<i64, MlError> {
        let age = raw.trim().parse::<i64>().map_err(|_| {
            MlError::invalid_input(format!("invalid literal for Age: '{raw}' is not a whole number"))
        })?;
        self.age_policy.check(age)
    }
}

/// Maps the State sentinel to a missing cell; everything else passes through.
pub fn encode_state(raw: &str) -> CellValue {
    if raw == STATE_MISSING_SENTINEL {
        CellValue::Missing
    } else {
        CellValue::Category(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_answers() -> SurveyAnswers {
        SurveyAnswers::dashboard_defaults()
    }

    #[test]
    fn test_build_uses_schema_order() {
        let record = RecordBuilder::default().build(&full_answers()).unwrap();
        let cols: Vec<&str> = record.columns().collect();
        let expected: Vec<&str> = survey::columns().collect();
        assert_eq!(cols, expected);
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = RecordBuilder::default();
        let answers = full_answers().with("State", "NY");
        let first = builder.build(&answers).unwrap();
        let second = builder.build(&answers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_state_sentinel_becomes_missing() {
        let answers = full_answers().with("State", "nan");
        let record = RecordBuilder::default().build(&answers).unwrap();
        assert_eq!(record.get("State"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_other_states_pass_through() {
        for state in survey::STATE_OPTIONS.iter().filter(|s| **s != "nan") {
            let answers = full_answers().with("State", *state);
            let record = RecordBuilder::default().build(&answers).unwrap();
            assert_eq!(
                record.get("State"),
                Some(&CellValue::Category(state.to_string()))
            );
        }
    }

    #[test]
    fn test_nan_only_special_for_state() {
        let answers = full_answers().with("Gender", "nan");
        let record = RecordBuilder::default().build(&answers).unwrap();
        assert_eq!(
            record.get("Gender"),
            Some(&CellValue::Category("nan".into()))
        );
    }

    #[test]
    fn test_age_parsed_with_whitespace() {
        let answers = full_answers().with("Age", " 42 ");
        let record = RecordBuilder::default().build(&answers).unwrap();
        assert_eq!(record.get("Age"), Some(&CellValue::Integer(42)));
    }

    #[test]
    fn test_malformed_age_is_invalid_input() {
        let answers = full_answers().with("Age", "forty");
        let err = RecordBuilder::default().build(&answers).unwrap_err();
        assert!(matches!(err, MlError::InvalidInput(_)));
        assert!(err.to_string().contains("forty"));
    }

    #[test]
    fn test_unbounded_age_accepts_any_integer() {
        let answers = full_answers().with("Age", "120");
        let record = RecordBuilder::new(AgePolicy::Unbounded)
            .build(&answers)
            .unwrap();
        assert_eq!(record.get("Age"), Some(&CellValue::Integer(120)));
    }

    #[test]
    fn test_dashboard_age_range_enforced() {
        let builder = RecordBuilder::new(AgePolicy::dashboard());
        assert!(builder.build(&full_answers().with("Age", "18")).is_ok());
        assert!(builder.build(&full_answers().with("Age", "70")).is_ok());
        let err = builder
            .build(&full_answers().with("Age", "71"))
            .unwrap_err();
        assert!(err.to_string().contains("18-70"));
    }

    #[test]
    fn test_missing_field_named_in_error() {
        let mut answers = SurveyAnswers::new();
        for (col, value) in [("Age", "30"), ("Gender", "Male")] {
            answers.insert(col, value);
        }
        let err = RecordBuilder::default().build(&answers).unwrap_err();
        assert!(err.to_string().contains("'Country'"));
    }

    #[test]
    fn test_dashboard_defaults_cover_all_fields() {
        let answers = SurveyAnswers::dashboard_defaults();
        assert_eq!(answers.len(), 24);
        assert_eq!(answers.get("Age"), Some("30"));
        assert_eq!(answers.get("Gender"), Some("Male"));
        assert_eq!(answers.get("State"), Some("CA"));
    }

    #[test]
    fn test_answers_deserialize_from_json_object() {
        let answers: SurveyAnswers =
            serde_json::from_str(r#"{"Age":"30","Gender":"Female"}"#).unwrap();
        assert_eq!(answers.get("Gender"), Some("Female"));
    }

    #[test]
    fn test_answers_accept_numeric_json_values() {
        let answers: SurveyAnswers =
            serde_json::from_str(r#"{"Age":30,"Gender":"Female","Score":2.5}"#).unwrap();
        assert_eq!(answers.get("Age"), Some("30"));
        assert_eq!(answers.get("Score"), Some("2.5"));
        let record = RecordBuilder::default()
            .build(&SurveyAnswers::dashboard_defaults().with("Age", answers.get("Age").unwrap()))
            .unwrap();
        assert_eq!(record.get("Age"), Some(&CellValue::Integer(30)));
    }

    #[test]
    fn test_answers_reject_nested_values() {
        let result: Result<SurveyAnswers, _> = serde_json::from_str(r#"{"Age":[30]}"#);
        assert!(result.is_err());
    }
}
