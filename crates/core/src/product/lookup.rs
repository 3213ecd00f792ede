//! Restaurant existence check against an injected store.

use async_trait::async_trait;
use serde_json::Value;

use super::violation::{FieldViolation, ViolationKind};
use crate::types::DbId;

/// The store failed while resolving a reference (e.g. connectivity).
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct LookupError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl LookupError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Resolves restaurant identifiers.
///
/// Implemented by the PostgreSQL adapter in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait RestaurantLookup: Send + Sync {
    /// `Ok(true)` when a restaurant with `id` exists, `Ok(false)` when it
    /// does not.
    async fn restaurant_exists(&self, id: DbId) -> Result<bool, LookupError>;
}

pub const NOT_FOUND_MESSAGE: &str = "The restaurantId does not exist.";

/// Check that `id` resolves, reporting any problem against `field`.
pub async fn check_restaurant_exists<L>(lookup: &L, field: &str, id: DbId) -> Option<FieldViolation>
where
    L: RestaurantLookup + ?Sized,
{
    match lookup.restaurant_exists(id).await {
        Ok(true) => None,
        Ok(false) => Some(
            FieldViolation::new(field, ViolationKind::ReferenceNotFound, NOT_FOUND_MESSAGE)
                .with_value(Some(&Value::from(id))),
        ),
        Err(err) => {
            tracing::warn!(error = %err, restaurant_id = id, "Restaurant lookup failed");
            Some(
                FieldViolation::new(field, ViolationKind::LookupFailure, format!("Error: {err}"))
                    .with_value(Some(&Value::from(id))),
            )
        }
    }
}
