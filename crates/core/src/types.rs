/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// A decoded request body: JSON object or multipart text fields keyed by
/// form field name.
pub type RequestBody = serde_json::Map<String, serde_json::Value>;
