use recipe::Diet;
use serde::{Deserialize, Serialize};

/// Dietary survey a user fills in after registration.
///
/// Weight and height are optional; the calorie policy only activates when
/// both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Survey {
    pub diet: Diet,
    pub preferred_tags: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

/// A user as the engine sees it. Auth and profile fields live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Ingredient names that must never appear in a recommended recipe.
    pub allergies: Vec<String>,
    /// Ingredients the user already owns; suppressed from grocery lists.
    pub available_ingredients: Vec<String>,
    pub survey: Option<Survey>,
    /// Saved recipe ids, in save order. Append-only until an explicit
    /// unsave.
    pub saved_recipes: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            allergies: Vec::new(),
            available_ingredients: Vec::new(),
            survey: None,
            saved_recipes: Vec::new(),
        }
    }

    /// The survey diet, when one is set and carries a signal.
    pub fn survey_diet(&self) -> Option<&Diet> {
        self.survey
            .as_ref()
            .map(|survey| &survey.diet)
            .filter(|diet| diet.is_set())
    }
}
