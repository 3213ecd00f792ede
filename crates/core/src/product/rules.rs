//! Rule descriptors and the ordered create/update rule lists.

use std::fmt;

use super::field_rule::{FieldRule, Presence};
use super::nutrition::{NutritionCheck, NutritionRule};
use super::upload::{ImageFormatRule, ImageSizeRule};
use super::{
    AVAILABILITY_FIELD, DESCRIPTION_FIELD, IMAGE_FIELD, NAME_FIELD, ORDER_FIELD, PRICE_FIELD,
    PRODUCT_CATEGORY_ID_FIELD, RESTAURANT_ID_FIELD,
};
use crate::error::CoreError;

/// Default upload limit for product images, in bytes.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2_000_000;

/// MIME types accepted for product images by default.
pub const DEFAULT_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: u64 = 255;

/// Settings shared by every image-bearing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRuleConfig {
    pub max_image_bytes: u64,
    pub allowed_image_types: Vec<String>,
}

impl Default for ProductRuleConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_image_types: DEFAULT_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ProductRuleConfig {
    /// Default config with a different image size limit. Zero is rejected.
    pub fn with_max_image_bytes(max_image_bytes: u64) -> Result<Self, CoreError> {
        if max_image_bytes == 0 {
            return Err(CoreError::Validation(
                "max_image_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            max_image_bytes,
            ..Self::default()
        })
    }
}

/// Which rule list a request is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::Create => "create",
            ValidationMode::Update => "update",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a rule list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRule {
    Field(FieldRule),
    /// The key must not appear in the body at all.
    Forbidden { field: &'static str },
    /// The coerced integer in `field` must name an existing restaurant.
    RestaurantExists { field: &'static str },
    ImageFormat(ImageFormatRule),
    ImageSize(ImageSizeRule),
    Nutrition(NutritionRule),
}

impl ProductRule {
    /// The field whose error slot this rule reports into.
    pub fn field(&self) -> &'static str {
        match self {
            ProductRule::Field(rule) => rule.field,
            ProductRule::Forbidden { field } | ProductRule::RestaurantExists { field } => *field,
            ProductRule::ImageFormat(rule) => rule.field,
            ProductRule::ImageSize(rule) => rule.field,
            ProductRule::Nutrition(rule) => rule.report_on,
        }
    }
}

/// Rules common to both lists, up to and including `productCategoryId`.
fn scalar_rules(mode: ValidationMode) -> Vec<ProductRule> {
    let name = FieldRule::text(NAME_FIELD, Presence::Required, 1, Some(MAX_NAME_LEN));
    let name = match mode {
        ValidationMode::Create => name.trimmed(),
        ValidationMode::Update => name,
    };

    vec![
        ProductRule::Field(name),
        ProductRule::Field(
            FieldRule::text(DESCRIPTION_FIELD, Presence::OptionalFalsy, 1, None).trimmed(),
        ),
        ProductRule::Field(FieldRule::float(PRICE_FIELD, Presence::Required, Some(0.0))),
        ProductRule::Field(FieldRule::integer(ORDER_FIELD, Presence::Nullable, None)),
        ProductRule::Field(FieldRule::boolean(AVAILABILITY_FIELD, Presence::Optional)),
        ProductRule::Field(FieldRule::integer(
            PRODUCT_CATEGORY_ID_FIELD,
            Presence::Required,
            Some(1),
        )),
    ]
}

/// Image and nutrition rules, shared by both lists.
fn trailing_rules(config: &ProductRuleConfig) -> Vec<ProductRule> {
    vec![
        ProductRule::ImageFormat(ImageFormatRule {
            field: IMAGE_FIELD,
            allowed_types: config.allowed_image_types.clone(),
        }),
        ProductRule::ImageSize(ImageSizeRule {
            field: IMAGE_FIELD,
            max_bytes: config.max_image_bytes,
        }),
        ProductRule::Nutrition(NutritionRule::standard(NutritionCheck::Composition)),
        ProductRule::Nutrition(NutritionRule::standard(NutritionCheck::CalorieCap)),
    ]
}

/// The rule list applied when creating a product.
pub fn create_rules(config: &ProductRuleConfig) -> Vec<ProductRule> {
    let mut rules = scalar_rules(ValidationMode::Create);
    rules.push(ProductRule::Field(FieldRule::integer(
        RESTAURANT_ID_FIELD,
        Presence::Required,
        Some(1),
    )));
    rules.push(ProductRule::RestaurantExists {
        field: RESTAURANT_ID_FIELD,
    });
    rules.extend(trailing_rules(config));
    rules
}

/// The rule list applied when updating a product. The owning restaurant is
/// immutable, so `restaurantId` is forbidden.
pub fn update_rules(config: &ProductRuleConfig) -> Vec<ProductRule> {
    let mut rules = scalar_rules(ValidationMode::Update);
    rules.push(ProductRule::Forbidden {
        field: RESTAURANT_ID_FIELD,
    });
    rules.extend(trailing_rules(config));
    rules
}
