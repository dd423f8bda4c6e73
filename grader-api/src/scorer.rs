use serde_json::Value;

use crate::types::ScoreValue;

/// The closed set of comparison strategies course content can attach to a
/// question. Each variant carries its own parameters; [`Scorer::score`] is
/// the single dispatch point mapping (computed result, expected answer) to a
/// numeric score.
#[derive(Debug, Clone, PartialEq)]
pub enum Scorer {
    /// Full credit only for structural equality.
    ExactMatch,
    /// Full credit when the result is a number within `tolerance` of the
    /// answer.
    NumericTolerance { tolerance: f64 },
    /// Per-element numeric comparison of two sequences; credit is the
    /// fraction of answer positions matched within `tolerance`.
    ListNumericTolerance { tolerance: f64 },
}

impl Scorer {
    pub fn score(&self, result: &Value, answer: &Value) -> ScoreValue {
        let score = match self {
            Self::ExactMatch => {
                if result == answer {
                    1.0
                } else {
                    0.0
                }
            }
            Self::NumericTolerance { tolerance } => {
                match (result.as_f64(), answer.as_f64()) {
                    (Some(result), Some(answer)) if (result - answer).abs() <= *tolerance => 1.0,
                    _ => 0.0,
                }
            }
            Self::ListNumericTolerance { tolerance } => {
                Self::list_fraction(result, answer, *tolerance)
            }
        };

        ScoreValue::new(score)
    }

    fn list_fraction(result: &Value, answer: &Value, tolerance: f64) -> f64 {
        let (Some(result), Some(answer)) = (result.as_array(), answer.as_array()) else {
            return 0.0;
        };
        if answer.is_empty() {
            return if result.is_empty() { 1.0 } else { 0.0 };
        }

        let matched = result
            .iter()
            .zip(answer)
            .filter(|(result, answer)| match (result.as_f64(), answer.as_f64()) {
                (Some(result), Some(answer)) => (result - answer).abs() <= tolerance,
                _ => false,
            })
            .count();

        // extra or missing positions count against the denominator
        matched as f64 / answer.len().max(result.len()) as f64
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn exact_match_is_all_or_nothing() {
        let scorer = Scorer::ExactMatch;
        assert_eq!(scorer.score(&json!("cat"), &json!("cat")).as_f64(), 1.0);
        assert_eq!(scorer.score(&json!("cat"), &json!("dog")).as_f64(), 0.0);
    }

    #[test]
    fn numeric_tolerance_accepts_nearby_values() {
        let scorer = Scorer::NumericTolerance { tolerance: 0.01 };
        assert_eq!(scorer.score(&json!(3.141), &json!(3.1415)).as_f64(), 1.0);
        assert_eq!(scorer.score(&json!(3.3), &json!(3.1415)).as_f64(), 0.0);
        assert_eq!(scorer.score(&json!("3.14"), &json!(3.1415)).as_f64(), 0.0);
    }

    #[test]
    fn list_scorer_gives_partial_credit_per_position() {
        let scorer = Scorer::ListNumericTolerance { tolerance: 0.5 };
        let score = scorer.score(&json!([1.0, 2.0, 9.0, 4.0]), &json!([1.1, 2.2, 3.3, 4.4]));
        assert_eq!(score.as_f64(), 0.75);
    }

    #[test]
    fn list_scorer_penalizes_length_mismatch() {
        let scorer = Scorer::ListNumericTolerance { tolerance: 0.5 };
        let score = scorer.score(&json!([1.0, 2.0]), &json!([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(score.as_f64(), 0.5);
    }
}
