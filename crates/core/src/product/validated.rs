//! The typed product input produced by a successful validation pass.

use serde::{Deserialize, Serialize};

use super::upload::UploadedFile;
use crate::types::DbId;

/// Canonical product fields, ready for the create/update handler.
///
/// Built fresh on every run; the request body is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub order: Option<i64>,
    pub availability: Option<bool>,
    pub product_category_id: DbId,
    /// Set on create; always `None` on update.
    pub restaurant_id: Option<DbId>,
    /// Grams per 100 g.
    pub fats: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub image: Option<UploadedFile>,
}
