//! [`RestaurantLookup`] backed by PostgreSQL.

use async_trait::async_trait;
use deliverus_core::product::lookup::{LookupError, RestaurantLookup};
use deliverus_core::types::DbId;

use crate::repositories::RestaurantRepo;
use crate::DbPool;

/// Resolves restaurant references with [`RestaurantRepo::exists`].
#[derive(Debug, Clone)]
pub struct PgRestaurantLookup {
    pool: DbPool,
}

impl PgRestaurantLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantLookup for PgRestaurantLookup {
    async fn restaurant_exists(&self, id: DbId) -> Result<bool, LookupError> {
        RestaurantRepo::exists(&self.pool, id).await.map_err(|e| {
            tracing::error!(error = %e, restaurant_id = id, "Restaurant query failed");
            LookupError::new(e)
        })
    }
}
