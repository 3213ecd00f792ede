//! Field-scoped violation types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The category of a rule violation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Wrong type or shape (e.g. a number where a string is expected).
    FieldType,
    /// Well-typed but out of bounds (length or numeric minimum).
    FieldRange,
    /// Missing when required, or present when forbidden.
    FieldPresence,
    /// fats + proteins + carbs is not exactly 100 grams.
    Composition,
    /// The product exceeds 1000 calories per 100 grams.
    CalorieCap,
    /// The referenced restaurant does not exist.
    ReferenceNotFound,
    /// The restaurant store failed while resolving the reference.
    LookupFailure,
    /// The uploaded image has a disallowed MIME type.
    FileFormat,
    /// The uploaded image exceeds the configured byte size.
    FileSize,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldViolation {
    pub fn new(field: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
            value: None,
        }
    }

    /// Attach the offending raw value, if there is one.
    pub fn with_value(mut self, value: Option<&Value>) -> Self {
        self.value = value.cloned();
        self
    }
}

/// The outcome of a rejected request: every violation collected in rule
/// order. This is an ordinary result, not a fault.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("Product validation failed with {} violation(s)", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<FieldViolation>) -> Self {
        Self { errors }
    }

    /// Violations reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.errors.iter().filter(move |v| v.field == field)
    }

    /// Whether `field` carries a violation of `kind`.
    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.for_field(field).any(|v| v.kind == kind)
    }
}
