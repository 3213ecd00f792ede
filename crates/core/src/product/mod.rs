//! Product request validation.
//!
//! Two ordered rule lists (create and update) are evaluated against a
//! request body, collecting every field-scoped violation before deciding
//! whether the request is accepted. On success the typed, coerced values
//! are handed back as a [`validated::ValidatedProduct`].

pub mod coerce;
pub mod field_rule;
pub mod lookup;
pub mod nutrition;
pub mod rules;
pub mod upload;
pub mod validated;
pub mod validator;
pub mod violation;

pub const NAME_FIELD: &str = "name";
pub const DESCRIPTION_FIELD: &str = "description";
pub const PRICE_FIELD: &str = "price";
pub const ORDER_FIELD: &str = "order";
pub const AVAILABILITY_FIELD: &str = "availability";
pub const PRODUCT_CATEGORY_ID_FIELD: &str = "productCategoryId";
pub const RESTAURANT_ID_FIELD: &str = "restaurantId";
pub const IMAGE_FIELD: &str = "image";
pub const FATS_FIELD: &str = "fats";
pub const PROTEINS_FIELD: &str = "proteins";
pub const CARBS_FIELD: &str = "carbs";
