use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Meal-time slot a recipe is intended for.
///
/// The recommendation engine resolves the current wall-clock hour to one of
/// these slots and prioritizes matching recipes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

/// Diet a recipe conforms to, or a user follows.
///
/// `None` means "no particular diet" and never participates in diet-equality
/// matching. Unrecognized diets coming from free-form input land in `Other`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Diet {
    #[default]
    None,
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
    GlutenFree,
    DairyFree,
    LowCarb,
    #[strum(default)]
    Other(String),
}

impl Diet {
    /// True when the diet carries a real signal, i.e. is anything but `None`.
    pub fn is_set(&self) -> bool {
        !matches!(self, Diet::None)
    }
}

/// A recipe as the engine sees it.
///
/// Ingredients are free text and matched case-insensitively everywhere;
/// tags are matched as given. Cuisine labels are folded into `tags`.
/// `calories` may be missing for recipes that were never analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub diet: Diet,
    pub meal_time: MealTime,
    pub calories: Option<f64>,
    /// Ids of users who liked this recipe.
    pub likes: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn meal_time_round_trips_through_strings() {
        for slot in [
            MealTime::Breakfast,
            MealTime::Lunch,
            MealTime::Dinner,
            MealTime::Snack,
            MealTime::Dessert,
        ] {
            let parsed = MealTime::from_str(slot.as_ref()).unwrap();
            assert_eq!(parsed, slot);
        }
    }

    #[test]
    fn unknown_diet_falls_back_to_other() {
        let diet = Diet::from_str("Flexitarian").unwrap();
        assert_eq!(diet, Diet::Other("Flexitarian".to_string()));
        assert!(diet.is_set());
    }

    #[test]
    fn none_diet_carries_no_signal() {
        assert!(!Diet::None.is_set());
        assert!(Diet::Vegan.is_set());
    }
}
