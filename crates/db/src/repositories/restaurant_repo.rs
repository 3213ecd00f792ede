//! Repository for the `restaurants` table.

use deliverus_core::types::DbId;
use sqlx::PgPool;

/// Read access to restaurants.
pub struct RestaurantRepo;

impl RestaurantRepo {
    /// Whether a restaurant with the given internal ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
