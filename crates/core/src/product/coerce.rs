//! Value coercion helpers shared by the field and cross-field rules.
//!
//! Multipart bodies deliver every field as a string while JSON bodies may
//! carry native numbers and booleans, so each strict parser accepts both.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Decimal float syntax: optional sign, digits with an optional fraction
/// (either side may be empty but not both), optional exponent.
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// Integer syntax: optional sign followed by digits.
static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"));

/// Longest leading decimal literal, used by [`parse_number`].
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(Infinity|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)")
        .expect("valid regex")
});

/// Parse a value as a finite float. Numeric strings are accepted.
pub fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) if FLOAT_RE.is_match(s) => {
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Parse a value as an `i64`. Floats with no fractional part count as
/// integers (`3.0` is `3`).
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) if INT_RE.is_match(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// Parse a value as a boolean.
///
/// Accepts `true`/`false`, the strings `"true"`, `"false"`, `"1"`, `"0"`,
/// and the numbers `1` and `0`.
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Whether a value is "falsy": `null`, `false`, `0`, or the empty string.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Lenient numeric parse used by the nutrition rules.
///
/// Numbers pass through, strings contribute their longest leading decimal
/// literal after leading whitespace (`"12abc"` is `12`), and everything else
/// (absent, null, booleans, non-numeric strings) is NaN.
pub fn parse_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim_start();
            let Some(m) = LEADING_NUMBER_RE.find(s) else {
                return f64::NAN;
            };
            let literal = m.as_str();
            match literal.trim_start_matches(['+', '-']) {
                "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
                "Infinity" => f64::INFINITY,
                _ => literal.parse::<f64>().unwrap_or(f64::NAN),
            }
        }
        _ => f64::NAN,
    }
}
