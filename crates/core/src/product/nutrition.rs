//! Cross-field nutritional-composition rules.
//!
//! Products declare fats, proteins, and carbohydrates per 100 grams. Two
//! independent checks read all three values and report against a single
//! designated field.
//!
//! Values go through [`parse_number`], so a non-numeric input becomes NaN.
//! NaN never equals 100 and is never greater than the calorie cap: the
//! composition check fails while the calorie check passes.

use super::coerce::parse_number;
use super::violation::{FieldViolation, ViolationKind};
use super::{CARBS_FIELD, FATS_FIELD, PROTEINS_FIELD};
use crate::types::RequestBody;

/// Grams of macronutrients that must make up one portion.
pub const PORTION_GRAMS: f64 = 100.0;

/// Maximum calories allowed per portion.
pub const CALORIE_CAP: f64 = 1000.0;

pub const FAT_CALORIES_PER_GRAM: f64 = 9.0;
pub const PROTEIN_CALORIES_PER_GRAM: f64 = 4.0;
pub const CARB_CALORIES_PER_GRAM: f64 = 4.0;

pub const COMPOSITION_MESSAGE: &str = "The sum of 100 grams cannot exceed 100.";
pub const CALORIE_CAP_MESSAGE: &str = "The sum of 1000 calories cannot exceed 1000.";

/// Which relationship among the three values is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutritionCheck {
    Composition,
    CalorieCap,
}

/// A multi-field rule reading three named inputs and reporting against
/// `report_on`.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRule {
    pub check: NutritionCheck,
    pub report_on: &'static str,
    pub fats: &'static str,
    pub proteins: &'static str,
    pub carbs: &'static str,
}

impl NutritionRule {
    /// The product rule: reads `fats`, `proteins`, `carbs` and reports on `fats`.
    pub fn standard(check: NutritionCheck) -> Self {
        Self {
            check,
            report_on: FATS_FIELD,
            fats: FATS_FIELD,
            proteins: PROTEINS_FIELD,
            carbs: CARBS_FIELD,
        }
    }

    pub fn evaluate(&self, body: &RequestBody) -> Option<FieldViolation> {
        let fats = parse_number(body.get(self.fats));
        let proteins = parse_number(body.get(self.proteins));
        let carbs = parse_number(body.get(self.carbs));

        let (passes, kind, message) = match self.check {
            NutritionCheck::Composition => (
                composition_holds(fats, proteins, carbs),
                ViolationKind::Composition,
                COMPOSITION_MESSAGE,
            ),
            NutritionCheck::CalorieCap => (
                within_calorie_cap(fats, proteins, carbs),
                ViolationKind::CalorieCap,
                CALORIE_CAP_MESSAGE,
            ),
        };

        if passes {
            None
        } else {
            Some(
                FieldViolation::new(self.report_on, kind, message)
                    .with_value(body.get(self.report_on)),
            )
        }
    }
}

/// Strict floating-point equality with [`PORTION_GRAMS`]; no tolerance.
///
/// Decimal inputs such as 10.1 + 64.1 + 25.8 sum to 99.99999999999999 in
/// binary floating point and are then rejected.
#[allow(clippy::float_cmp)]
pub fn composition_holds(fats: f64, proteins: f64, carbs: f64) -> bool {
    fats + proteins + carbs == PORTION_GRAMS
}

/// Calories per portion, using the 9/4/4 approximation.
pub fn calories(fats: f64, proteins: f64, carbs: f64) -> f64 {
    fats * FAT_CALORIES_PER_GRAM
        + proteins * PROTEIN_CALORIES_PER_GRAM
        + carbs * CARB_CALORIES_PER_GRAM
}

/// Whether the portion stays at or under [`CALORIE_CAP`]. NaN passes.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn within_calorie_cap(fats: f64, proteins: f64, carbs: f64) -> bool {
    !(calories(fats, proteins, carbs) > CALORIE_CAP)
}
