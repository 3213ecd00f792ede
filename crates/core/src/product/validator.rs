//! Runs a rule list against one request and collects every violation.

use super::coerce::parse_number;
use super::field_rule::{CanonicalValues, FieldOutcome};
use super::lookup::{check_restaurant_exists, RestaurantLookup};
use super::rules::{create_rules, update_rules, ProductRule, ProductRuleConfig, ValidationMode};
use super::upload::UploadSource;
use super::validated::ValidatedProduct;
use super::violation::{FieldViolation, ValidationFailure, ViolationKind};
use super::{
    AVAILABILITY_FIELD, CARBS_FIELD, DESCRIPTION_FIELD, FATS_FIELD, IMAGE_FIELD, NAME_FIELD,
    ORDER_FIELD, PRICE_FIELD, PRODUCT_CATEGORY_ID_FIELD, PROTEINS_FIELD, RESTAURANT_ID_FIELD,
};
use crate::types::RequestBody;

/// A prebuilt rule list for one mode.
///
/// Holds no per-request state, so a single instance can be shared across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ProductValidator {
    mode: ValidationMode,
    rules: Vec<ProductRule>,
}

impl ProductValidator {
    pub fn for_create(config: &ProductRuleConfig) -> Self {
        Self {
            mode: ValidationMode::Create,
            rules: create_rules(config),
        }
    }

    pub fn for_update(config: &ProductRuleConfig) -> Self {
        Self {
            mode: ValidationMode::Update,
            rules: update_rules(config),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn rules(&self) -> &[ProductRule] {
        &self.rules
    }

    /// Evaluate every rule against `body`.
    ///
    /// All rules run; violations are returned in rule order. The restaurant
    /// lookup only runs once its field coerced to a valid id, so the
    /// `restaurantId` slot holds at most one violation.
    pub async fn validate<U, L>(
        &self,
        body: &RequestBody,
        uploads: &U,
        lookup: &L,
    ) -> Result<ValidatedProduct, ValidationFailure>
    where
        U: UploadSource + ?Sized,
        L: RestaurantLookup + ?Sized,
    {
        let mut canonical = CanonicalValues::default();
        let mut errors = Vec::new();

        for rule in &self.rules {
            match rule {
                ProductRule::Field(field_rule) => match field_rule.evaluate(body) {
                    FieldOutcome::Skipped => {}
                    FieldOutcome::Accepted(value) => canonical.insert(field_rule.field, value),
                    FieldOutcome::Rejected(violation) => errors.push(violation),
                },
                ProductRule::Forbidden { field } => {
                    if let Some(value) = body.get(*field) {
                        errors.push(
                            FieldViolation::new(
                                field,
                                ViolationKind::FieldPresence,
                                format!("{field} cannot be modified."),
                            )
                            .with_value(Some(value)),
                        );
                    }
                }
                ProductRule::RestaurantExists { field } => {
                    if let Some(id) = canonical.int(field) {
                        errors.extend(check_restaurant_exists(lookup, field, id).await);
                    }
                }
                ProductRule::ImageFormat(image_rule) => errors.extend(image_rule.check(uploads)),
                ProductRule::ImageSize(image_rule) => errors.extend(image_rule.check(uploads)),
                ProductRule::Nutrition(nutrition_rule) => {
                    errors.extend(nutrition_rule.evaluate(body))
                }
            }
        }

        let result = if errors.is_empty() {
            self.assemble(body, uploads, &canonical)
        } else {
            Err(errors)
        };

        match &result {
            Ok(_) => tracing::debug!(mode = %self.mode, "Product request accepted"),
            Err(errors) => tracing::debug!(
                mode = %self.mode,
                violations = errors.len(),
                "Product request rejected"
            ),
        }

        result.map_err(ValidationFailure::new)
    }

    /// Build the typed product from coerced values. Fails only when the rule
    /// list did not cover a field the product needs.
    fn assemble<U>(
        &self,
        body: &RequestBody,
        uploads: &U,
        canonical: &CanonicalValues,
    ) -> Result<ValidatedProduct, Vec<FieldViolation>>
    where
        U: UploadSource + ?Sized,
    {
        let mut missing = Vec::new();
        let mut require = |field: &str, present: bool| {
            if !present {
                missing.push(FieldViolation::new(
                    field,
                    ViolationKind::FieldPresence,
                    format!("{field} is required."),
                ));
            }
        };

        let name = canonical.text(NAME_FIELD);
        let price = canonical.float(PRICE_FIELD);
        let product_category_id = canonical.int(PRODUCT_CATEGORY_ID_FIELD);
        let restaurant_id = match self.mode {
            ValidationMode::Create => canonical.int(RESTAURANT_ID_FIELD),
            ValidationMode::Update => None,
        };
        require(NAME_FIELD, name.is_some());
        require(PRICE_FIELD, price.is_some());
        require(PRODUCT_CATEGORY_ID_FIELD, product_category_id.is_some());
        if self.mode == ValidationMode::Create {
            require(RESTAURANT_ID_FIELD, restaurant_id.is_some());
        }

        match (name, price, product_category_id) {
            (Some(name), Some(price), Some(product_category_id)) if missing.is_empty() => {
                Ok(ValidatedProduct {
                    name: name.to_string(),
                    description: canonical.text(DESCRIPTION_FIELD).map(str::to_string),
                    price,
                    order: canonical.int(ORDER_FIELD),
                    availability: canonical.bool(AVAILABILITY_FIELD),
                    product_category_id,
                    restaurant_id,
                    fats: parse_number(body.get(FATS_FIELD)),
                    proteins: parse_number(body.get(PROTEINS_FIELD)),
                    carbs: parse_number(body.get(CARBS_FIELD)),
                    image: uploads.file(IMAGE_FIELD).cloned(),
                })
            }
            _ => Err(missing),
        }
    }
}
