//! Report grading against an answer key
//!
//! Every key of the reference document is graded independently and the
//! score is the number of fields graded [`GradeOutcome::Correct`].

use crate::domain::{InspectorError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Result of grading a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradeOutcome {
    Correct,
    Incorrect,
    /// The answer document lacks the field
    MissingAnswer,
    /// The reference lacks the field
    MissingReference,
    MissingBoth,
}

impl GradeOutcome {
    /// Numeric outcome code (0 correct .. 4 missing from both)
    pub fn code(&self) -> u8 {
        match self {
            GradeOutcome::Correct => 0,
            GradeOutcome::Incorrect => 1,
            GradeOutcome::MissingAnswer => 2,
            GradeOutcome::MissingReference => 3,
            GradeOutcome::MissingBoth => 4,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, GradeOutcome::Correct)
    }
}

/// Comparison options
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradingOptions {
    pub case_sensitive: bool,
    /// Absolute tolerance for numeric fields, 0 disables numeric comparison
    pub numeric_tolerance: f64,
}

/// Outcome of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGrade {
    pub key: String,
    pub outcome: GradeOutcome,
}

/// Per-field outcomes and total score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub fields: Vec<FieldGrade>,
    pub score: usize,
    pub total: usize,
}

impl GradeReport {
    /// Report for an answer document that could not be graded at all
    pub fn zero(total: usize) -> Self {
        Self {
            fields: Vec::new(),
            score: 0,
            total,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

/// Renders a value for textual comparison
///
/// Strings compare by content, everything else by its JSON text.
fn comparable_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn values_match(answer: &Value, reference: &Value, options: &GradingOptions) -> bool {
    if options.numeric_tolerance > 0.0 {
        if let (Some(a), Some(r)) = (answer.as_f64(), reference.as_f64()) {
            return (a - r).abs() <= options.numeric_tolerance;
        }
    }

    let answer = comparable_text(answer);
    let reference = comparable_text(reference);
    if options.case_sensitive {
        answer == reference
    } else {
        answer.to_lowercase() == reference.to_lowercase()
    }
}

/// Grades one field of `answers` against `reference`
pub fn grade_field(
    answers: &Map<String, Value>,
    key: &str,
    reference: &Map<String, Value>,
    options: &GradingOptions,
) -> GradeOutcome {
    match (answers.get(key), reference.get(key)) {
        (None, None) => GradeOutcome::MissingBoth,
        (Some(_), None) => GradeOutcome::MissingReference,
        (None, Some(_)) => GradeOutcome::MissingAnswer,
        (Some(answer), Some(expected)) => {
            if values_match(answer, expected, options) {
                GradeOutcome::Correct
            } else {
                GradeOutcome::Incorrect
            }
        }
    }
}

/// Grades every reference field
///
/// An answer document that is not a JSON object scores zero.
pub fn grade_answers(
    answers: &Value,
    reference: &Map<String, Value>,
    options: &GradingOptions,
) -> GradeReport {
    let Some(answers) = answers.as_object() else {
        tracing::debug!("Answer document is not a JSON object");
        return GradeReport::zero(reference.len());
    };

    let fields: Vec<FieldGrade> = reference
        .keys()
        .map(|key| {
            let outcome = grade_field(answers, key, reference, options);
            if !outcome.is_correct() {
                tracing::debug!(key = %key, code = outcome.code(), "Field not correct");
            }
            FieldGrade {
                key: key.clone(),
                outcome,
            }
        })
        .collect();

    let score = fields.iter().filter(|f| f.outcome.is_correct()).count();
    GradeReport {
        total: fields.len(),
        fields,
        score,
    }
}

/// Reads an answer document
///
/// Returns `Ok(None)` when the file exists but is not valid JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn load_answers(path: impl AsRef<Path>) -> Result<Option<Value>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Answer file is not valid JSON");
            Ok(None)
        }
    }
}

/// Reads an answer key, which must be a JSON object
pub fn load_answer_key(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        InspectorError::Grading(format!(
            "Cannot read answer key {}: {e}",
            path.display()
        ))
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(InspectorError::Grading(format!(
            "Answer key {} must be a JSON object",
            path.display()
        ))),
        Err(e) => Err(InspectorError::Grading(format!(
            "Answer key {} is not valid JSON: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test_case(json!({"Sex": "f"}), json!({"Sex": "F"}), GradeOutcome::Correct ; "case insensitive")]
    #[test_case(json!({"Sex": "M"}), json!({"Sex": "F"}), GradeOutcome::Incorrect ; "wrong value")]
    #[test_case(json!({}), json!({"Sex": "F"}), GradeOutcome::MissingAnswer ; "missing answer")]
    #[test_case(json!({"Sex": "F"}), json!({}), GradeOutcome::MissingReference ; "missing reference")]
    #[test_case(json!({}), json!({}), GradeOutcome::MissingBoth ; "missing both")]
    #[test_case(json!({"Sex": null}), json!({"Sex": null}), GradeOutcome::Correct ; "null matches null")]
    #[test_case(json!({"Sex": "null"}), json!({"Sex": null}), GradeOutcome::Correct ; "null compares as text")]
    fn test_grade_field(answers: Value, reference: Value, expected: GradeOutcome) {
        let outcome = grade_field(
            &object(answers),
            "Sex",
            &object(reference),
            &GradingOptions::default(),
        );
        assert_eq!(outcome, expected);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(GradeOutcome::Correct.code(), 0);
        assert_eq!(GradeOutcome::Incorrect.code(), 1);
        assert_eq!(GradeOutcome::MissingAnswer.code(), 2);
        assert_eq!(GradeOutcome::MissingReference.code(), 3);
        assert_eq!(GradeOutcome::MissingBoth.code(), 4);
    }

    #[test]
    fn test_case_sensitive_option() {
        let options = GradingOptions {
            case_sensitive: true,
            ..Default::default()
        };
        let outcome = grade_field(
            &object(json!({"Modality": "ct"})),
            "Modality",
            &object(json!({"Modality": "CT"})),
            &options,
        );
        assert_eq!(outcome, GradeOutcome::Incorrect);
    }

    #[test]
    fn test_numbers_compare_textually_without_tolerance() {
        let reference = object(json!({"MinPixelVal": -2048.0}));
        let options = GradingOptions::default();
        assert_eq!(
            grade_field(&object(json!({"MinPixelVal": -2048.0})), "MinPixelVal", &reference, &options),
            GradeOutcome::Correct
        );
        assert_eq!(
            grade_field(&object(json!({"MinPixelVal": -2048})), "MinPixelVal", &reference, &options),
            GradeOutcome::Incorrect
        );
    }

    #[test]
    fn test_numeric_tolerance() {
        let options = GradingOptions {
            numeric_tolerance: 0.5,
            ..Default::default()
        };
        let reference = object(json!({"MeanPixelVal": -929}));
        assert_eq!(
            grade_field(&object(json!({"MeanPixelVal": -929.31})), "MeanPixelVal", &reference, &options),
            GradeOutcome::Correct
        );
        assert_eq!(
            grade_field(&object(json!({"MeanPixelVal": -930.0})), "MeanPixelVal", &reference, &options),
            GradeOutcome::Incorrect
        );
    }

    #[test]
    fn test_grade_answers_scores_reference_keys() {
        let reference = object(json!({"Sex": "F", "Modality": "CT", "NumRows": 512}));
        let answers = json!({"Sex": "F", "Modality": "MR", "Extra": 1});

        let report = grade_answers(&answers, &reference, &GradingOptions::default());

        assert_eq!(report.total, 3);
        assert_eq!(report.score, 1);
        assert!(!report.is_perfect());
        let missing = report.fields.iter().find(|f| f.key == "NumRows").unwrap();
        assert_eq!(missing.outcome, GradeOutcome::MissingAnswer);
    }

    #[test]
    fn test_non_object_answers_score_zero() {
        let reference = object(json!({"Sex": "F"}));
        let report = grade_answers(&json!([1, 2]), &reference, &GradingOptions::default());
        assert_eq!(report.score, 0);
        assert_eq!(report.total, 1);
        assert!(report.fields.is_empty());
    }
}
