//! Validates candidate answers against named type schemas before anything is
//! sent to the grading service.

use std::collections::HashMap;

use itertools::Itertools;
use jsonschema::JSONSchema;
use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::error::GradeError;
use crate::types::TypeTag;

lazy_static! {
    static ref VALIDATORS: HashMap<&'static str, JSONSchema> = {
        let schemas = [
            ("bool", json!({"type": "boolean"})),
            ("int", json!({"type": "integer"})),
            ("float", json!({"type": "number"})),
            ("string", json!({"type": "string"})),
            ("list", json!({"type": "array"})),
            ("list_int", json!({"type": "array", "items": {"type": "integer"}})),
            ("list_float", json!({"type": "array", "items": {"type": "number"}})),
            ("list_string", json!({"type": "array", "items": {"type": "string"}})),
            ("dict", json!({"type": "object"})),
        ];

        schemas
            .into_iter()
            .map(|(tag, schema)| {
                let compiled = JSONSchema::compile(&schema).expect("built-in schema compiles");
                (tag, compiled)
            })
            .collect()
    };
}

/// Checks `value` against the schema registered for `tag`. Pure check: no
/// side effects. An unregistered tag is an authoring error, reported as
/// [`GradeError::UnknownTypeTag`] rather than passed silently.
pub fn validate(value: &Value, tag: &TypeTag) -> Result<(), GradeError> {
    let validator = VALIDATORS
        .get(tag.as_str())
        .ok_or_else(|| GradeError::UnknownTypeTag(tag.clone()))?;

    if let Err(errors) = validator.validate(value) {
        let violations: Vec<_> = errors.collect();
        let instance_path = violations
            .first()
            .map(|violation| violation.instance_path.to_string())
            .unwrap_or_default();
        let detail = violations.iter().map(ToString::to_string).join("; ");

        return Err(GradeError::Validation {
            tag: tag.clone(),
            instance_path,
            detail,
        });
    }

    Ok(())
}
