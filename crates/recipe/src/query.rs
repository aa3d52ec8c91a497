//! Typed recipe predicates.
//!
//! The storage layer is an external collaborator; these are the only query
//! shapes the engine ever issues against it: equality on meal time and
//! diet, set membership on tags and ingredients (plain and negated),
//! calorie bounds, id-set exclusion, and a result limit. A store is free
//! to translate the filter into its own query language; the in-memory
//! reference store evaluates [`RecipeFilter::matches`] directly.

use std::collections::HashSet;

use crate::normalize::normalize_key;
use crate::types::{Diet, MealTime, Recipe};

/// OR-combined preference predicate used by the survey-based tier.
///
/// A candidate matches when any of its tags is in `tags`, any of its
/// lowercased ingredients is in `ingredients`, or its diet equals `diet`.
#[derive(Debug, Clone, Default)]
pub struct PreferenceFilter {
    /// Tag names, compared exactly as stored on the recipe.
    pub tags: HashSet<String>,
    /// Ingredient keys, already lowercased.
    pub ingredients: HashSet<String>,
    pub diet: Option<Diet>,
}

impl PreferenceFilter {
    /// True when no tag, ingredient, or diet signal is present at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.ingredients.is_empty() && self.diet.is_none()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if recipe.tags.iter().any(|tag| self.tags.contains(tag)) {
            return true;
        }
        if recipe
            .ingredients
            .iter()
            .any(|ing| self.ingredients.contains(&normalize_key(ing)))
        {
            return true;
        }
        match &self.diet {
            Some(diet) => recipe.diet == *diet,
            None => false,
        }
    }
}

/// Conjunctive recipe query.
///
/// Every populated field must hold for a recipe to match. `preference` is
/// the one disjunctive component; see [`PreferenceFilter`].
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub meal_time: Option<MealTime>,
    pub min_calories: Option<f64>,
    pub max_calories: Option<f64>,
    /// Recipe ids that must not be returned.
    pub exclude_ids: HashSet<String>,
    /// Lowercased ingredient keys that disqualify a recipe outright
    /// (allergy exclusion). Matching is exact per ingredient entry, not
    /// substring.
    pub exclude_ingredients: HashSet<String>,
    pub preference: Option<PreferenceFilter>,
    pub only_public: bool,
    pub limit: Option<usize>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.only_public && !recipe.is_public {
            return false;
        }
        if let Some(slot) = self.meal_time {
            if recipe.meal_time != slot {
                return false;
            }
        }
        // A calorie bound only passes for recipes with known calories.
        if let Some(min) = self.min_calories {
            match recipe.calories {
                Some(calories) if calories >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_calories {
            match recipe.calories {
                Some(calories) if calories <= max => {}
                _ => return false,
            }
        }
        if self.exclude_ids.contains(&recipe.id) {
            return false;
        }
        if recipe
            .ingredients
            .iter()
            .any(|ing| self.exclude_ingredients.contains(&normalize_key(ing)))
        {
            return false;
        }
        if let Some(preference) = &self.preference {
            if !preference.matches(recipe) {
                return false;
            }
        }
        true
    }
}

/// Deterministic candidate ordering: newest first, id as tie-break.
///
/// Stores without a native ordering capability apply this before the
/// limit so results stay reproducible under test.
pub fn sort_newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
