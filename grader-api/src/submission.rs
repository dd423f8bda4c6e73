use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GradeError;
use crate::question::QuestionName;
use crate::types::ScoreValue;

/// A learner's computed results for one question, packaged for transport.
/// Results are positionally correlated with the question's test cases, so the
/// sequence is kept exactly as the runner produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    question_name: QuestionName,
    submission: Vec<Value>,
}

impl Submission {
    pub fn new(question_name: QuestionName, results: Vec<Value>) -> Self {
        Self {
            question_name,
            submission: results,
        }
    }

    pub fn question_name(&self) -> &QuestionName {
        &self.question_name
    }

    pub fn results(&self) -> &[Value] {
        &self.submission
    }

    /// The wire form sent as the `submission` form field.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("a submission of JSON values serializes")
    }

    pub fn decode(text: &str) -> Result<Self, GradeError> {
        serde_json::from_str(text).map_err(|err| GradeError::Decode {
            raw: text.to_owned(),
            detail: err.to_string(),
        })
    }
}

/// The service's verdict for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    score: ScoreValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_msg: Option<String>,
}

impl Score {
    pub fn new(score: ScoreValue, error_msg: Option<String>) -> Self {
        Self { score, error_msg }
    }

    pub fn score(&self) -> ScoreValue {
        self.score
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    /// Parses a response body into a score. A body that does not parse is a
    /// decode error carrying the raw text, kept distinct from transport
    /// failures: the server answered, but the answer was garbage.
    pub fn decode(raw: &str) -> Result<Self, GradeError> {
        serde_json::from_str(raw).map_err(|err| GradeError::Decode {
            raw: raw.to_owned(),
            detail: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn submission_round_trips_name_and_ordered_results() {
        let original = Submission::new(
            QuestionName::new("ml__predict_housing"),
            vec![json!(1), json!([2.5, 3.5]), json!("three")],
        );

        let decoded = Submission::decode(&original.encode()).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.question_name().as_str(), "ml__predict_housing");
        assert_eq!(decoded.results()[1], json!([2.5, 3.5]));
    }

    #[test]
    fn score_decodes_with_and_without_error_msg() {
        let bare = Score::decode(r#"{"score": 0.87}"#).unwrap();
        assert_eq!(bare.score().as_f64(), 0.87);
        assert!(bare.error_msg().is_none());

        let caveat = Score::decode(r#"{"score": 1.0, "error_msg": "late penalty applied"}"#)
            .unwrap();
        assert_eq!(caveat.error_msg(), Some("late penalty applied"));
    }

    #[test]
    fn malformed_body_is_a_decode_error_preserving_the_raw_text() {
        let raw = "<html>502 Bad Gateway</html>";
        let err = Score::decode(raw).unwrap_err();
        match err {
            GradeError::Decode { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected a decode error, got {other:?}"),
        }
    }
}
