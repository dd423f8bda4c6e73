use thiserror::Error;

use crate::question::QuestionName;
use crate::types::TypeTag;

/// Everything that can go wrong during a single grading call. Each variant is
/// a terminal outcome: grading reports it and yields no score for the run.
#[derive(Debug, Error)]
pub enum GradeError {
    /// A computed result does not satisfy its test case's type schema.
    /// Nothing is submitted once this is raised.
    #[error("result failed validation for type `{tag}` at `{instance_path}`: {detail}")]
    Validation {
        tag: TypeTag,
        instance_path: String,
        detail: String,
    },

    /// The question is unknown, remotely (non-success status on the
    /// test-case fetch) or locally (absent from the registry).
    #[error("no question found: {0}")]
    Lookup(QuestionName),

    /// The service answered, but the body was not a parseable score. The raw
    /// body is kept for diagnosis by course staff.
    #[error("could not decode score response ({detail}); raw response: {raw}")]
    Decode { raw: String, detail: String },

    /// The service did not answer: connection, timeout, or a non-success
    /// status on the submission itself.
    #[error("could not reach the grading service")]
    Transport(#[from] reqwest::Error),

    /// A test case names a type tag no schema is registered for. This is a
    /// question-authoring error, never a silent pass.
    #[error("no schema registered for type tag `{0}`")]
    UnknownTypeTag(TypeTag),

    /// A locally declared question is missing the literal answer its scorer
    /// needs.
    #[error("question `{0}` has no recorded answer for its final test case")]
    MissingAnswer(QuestionName),

    #[error("could not build a grading service URL")]
    InvalidUrl(#[from] url::ParseError),
}
