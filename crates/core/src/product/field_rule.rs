//! Declarative single-field rules: presence, type coercion, and bounds.

use std::collections::HashMap;

use serde_json::Value;
use validator::{ValidateLength, ValidateRange};

use super::coerce::{is_falsy, parse_bool, parse_float, parse_int};
use super::violation::{FieldViolation, ViolationKind};
use crate::types::RequestBody;

/// How a field's absence is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key must be present. `null` counts as present and then fails the
    /// type check.
    Required,
    /// An absent key is skipped; any present value is checked.
    Optional,
    /// An absent key or `null` is skipped.
    Nullable,
    /// An absent key or any falsy value (`null`, `""`, `false`, `0`) is
    /// skipped.
    OptionalFalsy,
}

/// The expected shape of a field and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        min_len: u64,
        max_len: Option<u64>,
        /// Trim whitespace from the canonical value. Length is checked on
        /// the value as sent.
        trim: bool,
    },
    Float {
        min: Option<f64>,
    },
    Integer {
        min: Option<i64>,
    },
    Boolean,
}

/// A single-field constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub kind: FieldKind,
}

/// A field value after successful coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

/// Result of evaluating one [`FieldRule`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// The field is optional and was not supplied.
    Skipped,
    Accepted(Coerced),
    Rejected(FieldViolation),
}

impl FieldRule {
    pub fn text(field: &'static str, presence: Presence, min_len: u64, max_len: Option<u64>) -> Self {
        Self {
            field,
            presence,
            kind: FieldKind::Text {
                min_len,
                max_len,
                trim: false,
            },
        }
    }

    pub fn float(field: &'static str, presence: Presence, min: Option<f64>) -> Self {
        Self {
            field,
            presence,
            kind: FieldKind::Float { min },
        }
    }

    pub fn integer(field: &'static str, presence: Presence, min: Option<i64>) -> Self {
        Self {
            field,
            presence,
            kind: FieldKind::Integer { min },
        }
    }

    pub fn boolean(field: &'static str, presence: Presence) -> Self {
        Self {
            field,
            presence,
            kind: FieldKind::Boolean,
        }
    }

    /// Trim the canonical value of a text field. No-op for other kinds.
    pub fn trimmed(mut self) -> Self {
        if let FieldKind::Text { trim, .. } = &mut self.kind {
            *trim = true;
        }
        self
    }

    /// Evaluate the rule against a request body.
    pub fn evaluate(&self, body: &RequestBody) -> FieldOutcome {
        let raw = body.get(self.field);
        let value = match (self.presence, raw) {
            (Presence::Required, None) => {
                return FieldOutcome::Rejected(FieldViolation::new(
                    self.field,
                    ViolationKind::FieldPresence,
                    format!("{} is required.", self.field),
                ));
            }
            (_, None) => return FieldOutcome::Skipped,
            (Presence::Nullable, Some(Value::Null)) => return FieldOutcome::Skipped,
            (Presence::OptionalFalsy, Some(v)) if is_falsy(v) => return FieldOutcome::Skipped,
            (_, Some(v)) => v,
        };

        match self.coerce(value) {
            Ok(coerced) => FieldOutcome::Accepted(coerced),
            Err(violation) => FieldOutcome::Rejected(violation.with_value(Some(value))),
        }
    }

    fn coerce(&self, value: &Value) -> Result<Coerced, FieldViolation> {
        match &self.kind {
            FieldKind::Text {
                min_len,
                max_len,
                trim,
            } => {
                let Value::String(s) = value else {
                    return Err(self.type_error("a string"));
                };
                if !s.validate_length(Some(*min_len), *max_len, None) {
                    let message = match max_len {
                        Some(max) => format!(
                            "{} must be between {min_len} and {max} characters.",
                            self.field
                        ),
                        None => format!("{} must be at least {min_len} character.", self.field),
                    };
                    return Err(self.range_error(message));
                }
                let canonical = if *trim { s.trim().to_string() } else { s.clone() };
                Ok(Coerced::Text(canonical))
            }
            FieldKind::Float { min } => {
                let f = parse_float(value).ok_or_else(|| self.type_error("a number"))?;
                if !f.validate_range(*min, None, None, None) {
                    return Err(self.min_error(min.map(|m| m.to_string())));
                }
                Ok(Coerced::Float(f))
            }
            FieldKind::Integer { min } => {
                let i = parse_int(value).ok_or_else(|| self.type_error("an integer"))?;
                if !i.validate_range(*min, None, None, None) {
                    return Err(self.min_error(min.map(|m| m.to_string())));
                }
                Ok(Coerced::Int(i))
            }
            FieldKind::Boolean => parse_bool(value)
                .map(Coerced::Bool)
                .ok_or_else(|| self.type_error("a boolean")),
        }
    }

    fn type_error(&self, expected: &str) -> FieldViolation {
        FieldViolation::new(
            self.field,
            ViolationKind::FieldType,
            format!("{} must be {expected}.", self.field),
        )
    }

    fn range_error(&self, message: String) -> FieldViolation {
        FieldViolation::new(self.field, ViolationKind::FieldRange, message)
    }

    fn min_error(&self, min: Option<String>) -> FieldViolation {
        let bound = min.unwrap_or_default();
        self.range_error(format!(
            "{} must be greater than or equal to {bound}.",
            self.field
        ))
    }
}

/// Coerced values of the fields that passed their rules, keyed by field.
#[derive(Debug, Default, Clone)]
pub struct CanonicalValues {
    values: HashMap<&'static str, Coerced>,
}

impl CanonicalValues {
    pub fn insert(&mut self, field: &'static str, value: Coerced) {
        self.values.insert(field, value);
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(Coerced::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        match self.values.get(field) {
            Some(Coerced::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        match self.values.get(field) {
            Some(Coerced::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        match self.values.get(field) {
            Some(Coerced::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}
