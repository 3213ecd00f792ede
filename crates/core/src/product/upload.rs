//! Uploaded-file metadata and the image format/size checks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::violation::{FieldViolation, ViolationKind};

/// Metadata of a file extracted from a request by the upload layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Exposes the file supplied for a named form field, if any.
pub trait UploadSource {
    fn file(&self, field: &str) -> Option<&UploadedFile>;
}

/// Request-scoped collection of uploaded files keyed by form field.
#[derive(Debug, Default, Clone)]
pub struct UploadedFiles {
    files: HashMap<String, UploadedFile>,
}

impl UploadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file, replacing any earlier one for the same field.
    pub fn insert(&mut self, file: UploadedFile) {
        self.files.insert(file.field.clone(), file);
    }
}

impl UploadSource for UploadedFiles {
    fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.get(field)
    }
}

/// Passes when no file was supplied or its MIME type is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFormatRule {
    pub field: &'static str,
    pub allowed_types: Vec<String>,
}

impl ImageFormatRule {
    pub fn check<U: UploadSource + ?Sized>(&self, uploads: &U) -> Option<FieldViolation> {
        let file = uploads.file(self.field)?;
        if self.allowed_types.iter().any(|t| *t == file.mime_type) {
            return None;
        }
        Some(
            FieldViolation::new(self.field, ViolationKind::FileFormat, self.message())
                .with_value(Some(&Value::from(file.mime_type.as_str()))),
        )
    }

    /// `Please upload an image with format (jpeg, png).` for the default types.
    pub fn message(&self) -> String {
        let formats: Vec<&str> = self
            .allowed_types
            .iter()
            .map(|t| t.rsplit('/').next().unwrap_or(t))
            .collect();
        format!(
            "Please upload an image with format ({}).",
            formats.join(", ")
        )
    }
}

/// Passes when no file was supplied or it is at most `max_bytes` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSizeRule {
    pub field: &'static str,
    pub max_bytes: u64,
}

impl ImageSizeRule {
    pub fn check<U: UploadSource + ?Sized>(&self, uploads: &U) -> Option<FieldViolation> {
        let file = uploads.file(self.field)?;
        if file.size_bytes <= self.max_bytes {
            return None;
        }
        Some(
            FieldViolation::new(self.field, ViolationKind::FileSize, self.message())
                .with_value(Some(&Value::from(file.size_bytes))),
        )
    }

    /// The limit in megabytes (threshold / 1,000,000).
    pub fn message(&self) -> String {
        format!("Maximum file size of {}MB", self.max_bytes as f64 / 1_000_000.0)
    }
}
