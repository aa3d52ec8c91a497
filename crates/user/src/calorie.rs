//! BMI-derived calorie filtering.
//!
//! The classification picks one of three coarse calorie rules; it is a
//! product heuristic, not a nutrition-accurate computation, and its
//! boundaries are part of the observable contract.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Calorie boundary separating "light" from "hearty" recipes.
///
/// Fixed design constant, not user-configurable: overweight users are
/// steered to recipes at or under it, underweight users to recipes at or
/// over it.
pub const CALORIE_PIVOT: f64 = 400.0;

/// Derived BMI category. Used only to pick a calorie rule, never shown as
/// a medical assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
}

impl BmiClass {
    /// Classify from height in centimeters and weight in kilograms.
    ///
    /// `bmi = weight / (height / 100)^2`. The underweight boundary is a
    /// strict `< 18.5`: 180 cm / 60 kg computes to roughly 18.52 and must
    /// classify as normal.
    pub fn classify(height_cm: f64, weight_kg: f64) -> BmiClass {
        let meters = height_cm / 100.0;
        let bmi = weight_kg / (meters * meters);
        if bmi < 18.5 {
            BmiClass::Underweight
        } else if bmi >= 25.0 {
            BmiClass::Overweight
        } else {
            BmiClass::Normal
        }
    }
}

/// Calorie predicate applied to recommendation candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalorieRule {
    /// No filtering; every candidate passes.
    Unconstrained,
    /// Calories must be known and at most the bound.
    AtMost(f64),
    /// Calories must be known and at least the bound.
    AtLeast(f64),
}

impl CalorieRule {
    /// Derive the rule from an optional height/weight pair.
    ///
    /// Either measurement missing means no calorie filtering at all.
    pub fn for_profile(height_cm: Option<f64>, weight_kg: Option<f64>) -> CalorieRule {
        let (Some(height), Some(weight)) = (height_cm, weight_kg) else {
            return CalorieRule::Unconstrained;
        };
        match BmiClass::classify(height, weight) {
            BmiClass::Overweight => CalorieRule::AtMost(CALORIE_PIVOT),
            BmiClass::Underweight => CalorieRule::AtLeast(CALORIE_PIVOT),
            BmiClass::Normal => CalorieRule::Unconstrained,
        }
    }

    /// Whether a recipe with the given calorie count passes the rule.
    /// Unknown calories fail any active bound.
    pub fn allows(&self, calories: Option<f64>) -> bool {
        match (self, calories) {
            (CalorieRule::Unconstrained, _) => true,
            (CalorieRule::AtMost(max), Some(calories)) => calories <= *max,
            (CalorieRule::AtLeast(min), Some(calories)) => calories >= *min,
            _ => false,
        }
    }

    /// The rule as (min, max) bounds for a recipe query.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            CalorieRule::Unconstrained => (None, None),
            CalorieRule::AtMost(max) => (None, Some(*max)),
            CalorieRule::AtLeast(min) => (Some(*min), None),
        }
    }
}
