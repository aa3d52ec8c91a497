//! Two-tier recommendation ranking.
//!
//! The meal-time tier collects recipes matching the current slot; the
//! preference tier collects recipes matching the user's accumulated
//! taste signals. The tiers are computed in order, never overlap, and
//! each is capped at a fixed size. Both honor the same hard exclusions:
//! recipes the user already saved or liked, and recipes containing an
//! allergy ingredient.

use std::collections::HashSet;

use async_trait::async_trait;
use recipe::{MealTime, PreferenceFilter, Recipe, RecipeFilter, normalize_key};
use serde::Serialize;
use user::{CalorieRule, User};

use crate::error::RecommendationError;
use crate::signals::UserSignals;

/// Query capability the ranker needs from the surrounding system.
///
/// Implementations must return candidates in a deterministic order
/// (newest first by creation time, ids breaking ties) and apply the
/// filter's limit themselves.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn find_candidates(&self, filter: &RecipeFilter) -> anyhow::Result<Vec<Recipe>>;
}

#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Maximum size of each tier.
    pub tier_limit: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig { tier_limit: 10 }
    }
}

/// The two ranked candidate lists returned to the caller. Disjoint by
/// construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendations {
    pub meal_time_based: Vec<Recipe>,
    pub survey_based: Vec<Recipe>,
}

/// Compute both tiers for a user.
///
/// `already_seen` is the exclusion base: every recipe id the user has
/// saved or liked. The preference tier additionally excludes whatever
/// the meal-time tier returned. When the user has no preference signal
/// at all (no tag or ingredient history, no survey tags or cuisines,
/// no diet), the preference tier falls back to any candidate passing
/// the calorie and exclusion filters, so brand-new users still get
/// recommendations.
pub async fn recommend(
    user: &User,
    already_seen: &HashSet<String>,
    signals: &UserSignals,
    calorie_rule: &CalorieRule,
    slot: MealTime,
    source: &dyn CandidateSource,
    config: &RankerConfig,
) -> Result<Recommendations, RecommendationError> {
    let allergy_keys: HashSet<String> = user.allergies.iter().map(|a| normalize_key(a)).collect();
    let (min_calories, max_calories) = calorie_rule.bounds();

    let meal_time_filter = RecipeFilter {
        meal_time: Some(slot),
        min_calories,
        max_calories,
        exclude_ids: already_seen.clone(),
        exclude_ingredients: allergy_keys.clone(),
        preference: None,
        only_public: true,
        limit: Some(config.tier_limit),
    };
    let meal_time_based = source.find_candidates(&meal_time_filter).await?;

    let mut exclude_ids = already_seen.clone();
    exclude_ids.extend(meal_time_based.iter().map(|r| r.id.clone()));

    let preference = preference_filter(user, signals);
    let survey_filter = RecipeFilter {
        meal_time: None,
        min_calories,
        max_calories,
        exclude_ids,
        exclude_ingredients: allergy_keys,
        // None engages the fallback: calorie and exclusion filters only.
        preference: if preference.is_empty() {
            None
        } else {
            Some(preference)
        },
        only_public: true,
        limit: Some(config.tier_limit),
    };
    let survey_based = source.find_candidates(&survey_filter).await?;

    Ok(Recommendations {
        meal_time_based,
        survey_based,
    })
}

/// Union of every preference signal available for the user: historical
/// tag and ingredient frequencies, survey tags and cuisines (cuisines
/// are matched against recipe tags), and the survey diet when set.
fn preference_filter(user: &User, signals: &UserSignals) -> PreferenceFilter {
    let mut tags: HashSet<String> = signals.tag_counts.keys().cloned().collect();
    if let Some(survey) = &user.survey {
        tags.extend(survey.preferred_tags.iter().cloned());
        tags.extend(survey.preferred_cuisines.iter().cloned());
    }

    PreferenceFilter {
        tags,
        ingredients: signals.ingredient_counts.keys().cloned().collect(),
        diet: user.survey_diet().cloned(),
    }
}
