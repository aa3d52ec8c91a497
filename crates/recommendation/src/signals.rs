//! Behavioral signal extraction.
//!
//! A user's taste profile is read off their history rather than asked
//! for: every recipe they saved, liked, or planned bumps a counter for
//! each of its tags and ingredients. The resulting frequency tables feed
//! the preference tier of the ranker.

use std::collections::HashMap;

use mealplan::MealPlan;
use recipe::{Recipe, normalize_key};
use serde::{Deserialize, Serialize};

/// Tag and ingredient frequency tables for one user.
///
/// Tag keys are counted as stored on the recipe; ingredient keys are
/// lowercased so "Garlic" and "garlic" pool into one signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSignals {
    pub tag_counts: HashMap<String, u32>,
    pub ingredient_counts: HashMap<String, u32>,
}

impl UserSignals {
    /// Scan saved recipes, then liked recipes, then every meal entry of
    /// every plan. Saved ids and plan entries are resolved through
    /// `recipes_by_id`; a reference that no longer resolves (the recipe
    /// was deleted) is skipped without error.
    pub fn extract(
        saved_ids: &[String],
        liked: &[Recipe],
        plans: &[MealPlan],
        recipes_by_id: &HashMap<String, Recipe>,
    ) -> UserSignals {
        let mut signals = UserSignals::default();

        for id in saved_ids {
            if let Some(recipe) = recipes_by_id.get(id) {
                signals.count_recipe(recipe);
            }
        }
        for recipe in liked {
            signals.count_recipe(recipe);
        }
        for plan in plans {
            for day in &plan.days {
                for meal in &day.meals {
                    if let Some(recipe) = recipes_by_id.get(&meal.recipe_id) {
                        signals.count_recipe(recipe);
                    }
                }
            }
        }

        signals
    }

    fn count_recipe(&mut self, recipe: &Recipe) {
        for tag in &recipe.tags {
            *self.tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }
        for ingredient in &recipe.ingredients {
            *self
                .ingredient_counts
                .entry(normalize_key(ingredient))
                .or_insert(0) += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag_counts.is_empty() && self.ingredient_counts.is_empty()
    }
}
