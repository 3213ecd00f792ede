use std::sync::Arc;

use deliverus_core::product::lookup::RestaurantLookup;
use deliverus_core::product::validator::ProductValidator;
use deliverus_db::lookup::PgRestaurantLookup;
use deliverus_db::DbPool;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The validators
/// carry no per-request state and are shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Resolves `restaurantId` references.
    pub restaurants: Arc<dyn RestaurantLookup>,
    pub create_validator: Arc<ProductValidator>,
    pub update_validator: Arc<ProductValidator>,
}

impl AppState {
    /// Build the state, constructing both rule lists from `config`.
    pub fn new(config: AppConfig, restaurants: Arc<dyn RestaurantLookup>) -> Self {
        let create_validator = Arc::new(ProductValidator::for_create(&config.rules));
        let update_validator = Arc::new(ProductValidator::for_update(&config.rules));
        Self {
            config: Arc::new(config),
            restaurants,
            create_validator,
            update_validator,
        }
    }

    /// Build the state with restaurant lookups served from PostgreSQL.
    pub fn with_pool(config: AppConfig, pool: DbPool) -> Self {
        Self::new(config, Arc::new(PgRestaurantLookup::new(pool)))
    }
}
