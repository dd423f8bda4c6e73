use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scorer::Scorer;
use crate::types::TypeTag;

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionName {
    name: String,
}

impl QuestionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The set prefix of a `set__question` style name, or the whole name when
    /// there is no `__` separator.
    pub fn set_prefix(&self) -> &str {
        match self.name.split_once("__") {
            Some((prefix, _)) => prefix,
            None => &self.name,
        }
    }
}

impl fmt::Display for QuestionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// One fixed invocation of learner code: positional and keyword arguments,
/// the schema its result must satisfy, and (for locally declared questions)
/// the literal expected answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    args: Vec<Value>,
    #[serde(default)]
    kwargs: Map<String, Value>,
    #[serde(rename = "type_str")]
    type_tag: TypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<Value>,
}

impl TestCase {
    pub fn new(args: Vec<Value>, kwargs: Map<String, Value>, type_tag: TypeTag) -> Self {
        Self {
            args,
            kwargs,
            type_tag,
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: Value) -> Self {
        self.answer = Some(answer);
        self
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &Map<String, Value> {
        &self.kwargs
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn answer(&self) -> Option<&Value> {
        self.answer.as_ref()
    }
}

/// A named unit of gradable work. Immutable once declared; the test-case
/// order is the order results are collected and submitted in.
#[derive(Debug, Clone)]
pub struct Question {
    name: QuestionName,
    test_cases: Vec<TestCase>,
    scorer: Scorer,
}

impl Question {
    pub fn new(name: QuestionName, test_cases: Vec<TestCase>, scorer: Scorer) -> Self {
        Self {
            name,
            test_cases,
            scorer,
        }
    }

    pub fn name(&self) -> &QuestionName {
        &self.name
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_prefix_splits_on_double_underscore() {
        let name = QuestionName::new("ml__predict_housing");
        assert_eq!(name.set_prefix(), "ml");
    }

    #[test]
    fn set_prefix_of_unprefixed_name_is_the_name() {
        let name = QuestionName::new("warmup");
        assert_eq!(name.set_prefix(), "warmup");
    }

    #[test]
    fn test_case_wire_format_uses_type_str() {
        let case = TestCase::new(
            vec![Value::from(3)],
            Map::new(),
            TypeTag::new("int"),
        );
        let encoded = serde_json::to_value(&case).unwrap();
        assert_eq!(encoded["type_str"], "int");
        assert!(encoded.get("answer").is_none());
    }

    #[test]
    fn test_case_decodes_with_missing_kwargs_and_answer() {
        let case: TestCase =
            serde_json::from_str(r#"{"args": [1, 2], "type_str": "int"}"#).unwrap();
        assert_eq!(case.args().len(), 2);
        assert!(case.kwargs().is_empty());
        assert!(case.answer().is_none());
    }
}
