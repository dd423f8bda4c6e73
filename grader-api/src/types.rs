//! Small wire-facing types shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Names a type schema a test-case result must satisfy. Serialized on the
/// wire as the test case's `type_str` field.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag {
    tag: String,
}

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.tag.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreValue {
    score: f64,
}

impl ScoreValue {
    pub fn new(score: f64) -> Self {
        Self { score }
    }

    pub fn as_f64(self) -> f64 {
        self.score
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.score.fmt(f)
    }
}
