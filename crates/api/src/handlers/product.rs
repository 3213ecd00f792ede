//! Handlers for dry-run product validation.
//!
//! Each handler reads a product form (multipart or JSON), runs the matching
//! rule list, and returns either the coerced product or every collected
//! violation.

use axum::extract::{Path, State};
use axum::Json;
use deliverus_core::error::CoreError;
use deliverus_core::product::validated::ValidatedProduct;
use deliverus_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::ProductForm;

/// POST /api/v1/products/validate
///
/// Validate a product creation form. Returns the coerced product on
/// success, or 422 with every violation.
pub async fn validate_create(
    State(state): State<AppState>,
    form: ProductForm,
) -> AppResult<Json<DataResponse<ValidatedProduct>>> {
    let product = state
        .create_validator
        .validate(&form.body, &form.files, state.restaurants.as_ref())
        .await?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/v1/products/{id}/validate
///
/// Validate a product update form. `restaurantId` must not be sent.
pub async fn validate_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: ProductForm,
) -> AppResult<Json<DataResponse<ValidatedProduct>>> {
    if id < 1 {
        return Err(CoreError::Validation(format!("product id must be positive, got {id}")).into());
    }
    tracing::debug!(product_id = id, "Validating product update");
    let product = state
        .update_validator
        .validate(&form.body, &form.files, state.restaurants.as_ref())
        .await?;
    Ok(Json(DataResponse { data: product }))
}
