//! The engine facade: request-scoped read-modify-write operations over
//! the storage capabilities.
//!
//! Every operation loads whole documents, runs the pure domain logic,
//! and persists the result in one save. Plan writes are version-checked
//! by the store, so two concurrent appends to the same day surface as a
//! conflict instead of silently losing one of them. No retries happen
//! here; retry policy belongs to the caller.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use mealplan::{GroceryAttribution, MealPlan, WeeklyNutrition, grocery, nutrition};
use recipe::{Recipe, RecipeFilter};
use recommendation::{
    CandidateSource, RankerConfig, Recommendations, UserSignals, meal_slot_at, recommend,
};
use store::{MealPlanStore, RecipeStore, UserStore};
use user::CalorieRule;
use uuid::Uuid;
use validator::Validate;

use crate::commands::{
    AddRecipeToPlanCommand, CreateMealPlanCommand, MarkMealDoneCommand,
    RemoveRecipeFromPlanCommand,
};
use crate::error::EngineError;

pub struct Engine<S> {
    store: S,
    ranker_config: RankerConfig,
}

impl<S> Engine<S> {
    pub fn new(store: S) -> Self {
        Engine {
            store,
            ranker_config: RankerConfig::default(),
        }
    }

    pub fn with_ranker_config(store: S, ranker_config: RankerConfig) -> Self {
        Engine {
            store,
            ranker_config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> Engine<S>
where
    S: UserStore + RecipeStore + MealPlanStore,
{
    /// Personalized two-tier recommendations for a user.
    ///
    /// `now` picks the meal-time slot; tests pass a fixed timestamp,
    /// callers without an opinion get the local wall clock.
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        now: Option<NaiveDateTime>,
    ) -> Result<Recommendations, EngineError> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let liked = self.store.find_recipes_liked_by(user_id).await?;
        let plans = self.store.find_meal_plans_by_user(user_id).await?;

        // One batched fetch resolves saved and planned references; ids
        // that no longer resolve drop out here and are skipped downstream.
        let mut history_ids: Vec<String> = user.saved_recipes.clone();
        for plan in &plans {
            history_ids.extend(plan.referenced_recipe_ids());
        }
        history_ids.sort();
        history_ids.dedup();
        let recipes_by_id: HashMap<String, Recipe> = self
            .store
            .find_recipes_by_ids(&history_ids)
            .await?
            .into_iter()
            .map(|recipe| (recipe.id.clone(), recipe))
            .collect();

        let signals = UserSignals::extract(&user.saved_recipes, &liked, &plans, &recipes_by_id);
        let (height_cm, weight_kg) = user
            .survey
            .as_ref()
            .map(|survey| (survey.height_cm, survey.weight_kg))
            .unwrap_or((None, None));
        let calorie_rule = CalorieRule::for_profile(height_cm, weight_kg);
        let now = now.unwrap_or_else(|| Local::now().naive_local());
        let slot = meal_slot_at(now);

        let mut already_seen: HashSet<String> = user.saved_recipes.iter().cloned().collect();
        already_seen.extend(liked.iter().map(|recipe| recipe.id.clone()));

        let source = StoreCandidates(&self.store);
        let recommendations = recommend(
            &user,
            &already_seen,
            &signals,
            &calorie_rule,
            slot,
            &source,
            &self.ranker_config,
        )
        .await?;

        tracing::debug!(
            user_id,
            slot = %slot,
            meal_time_based = recommendations.meal_time_based.len(),
            survey_based = recommendations.survey_based.len(),
            "computed recommendations"
        );
        Ok(recommendations)
    }

    /// Create an empty meal plan for a user.
    pub async fn create_meal_plan(
        &self,
        cmd: CreateMealPlanCommand,
    ) -> Result<MealPlan, EngineError> {
        cmd.validate()?;
        self.store
            .find_user(&cmd.user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(cmd.user_id.clone()))?;

        let plan = MealPlan::new(Uuid::new_v4().to_string(), cmd.user_id.clone());
        self.store.insert_meal_plan(&plan).await?;
        tracing::info!(plan_id = %plan.id, user_id = %cmd.user_id, "created meal plan");
        Ok(plan)
    }

    /// Plan a recipe for a date, updating the grocery list in the same
    /// save. Duplicate (day, recipe) pairs are a conflict.
    pub async fn add_recipe_to_plan(
        &self,
        cmd: AddRecipeToPlanCommand,
    ) -> Result<MealPlan, EngineError> {
        cmd.validate()?;
        let mut plan = self
            .store
            .find_meal_plan(&cmd.plan_id)
            .await?
            .ok_or_else(|| EngineError::PlanNotFound(cmd.plan_id.clone()))?;
        let user = self
            .store
            .find_user(&plan.user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(plan.user_id.clone()))?;
        let recipe = self
            .store
            .find_recipe(&cmd.recipe_id)
            .await?
            .ok_or_else(|| EngineError::RecipeNotFound(cmd.recipe_id.clone()))?;

        grocery::add_recipe(&mut plan, &cmd.date, &recipe, &user.available_ingredients)?;
        let saved = self.store.save_meal_plan(&plan).await?;
        tracing::debug!(
            plan_id = %saved.id,
            date = %cmd.date,
            recipe_id = %cmd.recipe_id,
            groceries = saved.grocery_list.len(),
            "added recipe to plan"
        );
        Ok(saved)
    }

    /// Remove a planned recipe and rebuild the grocery list from the
    /// remaining entries. Removing an entry that is not there is
    /// NotFound and changes nothing.
    pub async fn remove_recipe_from_plan(
        &self,
        cmd: RemoveRecipeFromPlanCommand,
    ) -> Result<MealPlan, EngineError> {
        cmd.validate()?;
        let mut plan = self
            .store
            .find_meal_plan(&cmd.plan_id)
            .await?
            .ok_or_else(|| EngineError::PlanNotFound(cmd.plan_id.clone()))?;

        // Ingredient lists for everything the plan references, fetched
        // before the removal so the recompute sees the whole plan.
        let referenced = plan.referenced_recipe_ids();
        let ingredients_by_recipe: HashMap<String, Vec<String>> = self
            .store
            .find_recipes_by_ids(&referenced)
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe.ingredients))
            .collect();

        grocery::remove_recipe(&mut plan, &cmd.date, &cmd.recipe_id, &ingredients_by_recipe)?;
        let saved = self.store.save_meal_plan(&plan).await?;
        tracing::debug!(
            plan_id = %saved.id,
            date = %cmd.date,
            recipe_id = %cmd.recipe_id,
            "removed recipe from plan"
        );
        Ok(saved)
    }

    /// Toggle a meal entry's completion flag.
    pub async fn mark_meal_done(&self, cmd: MarkMealDoneCommand) -> Result<MealPlan, EngineError> {
        cmd.validate()?;
        let mut plan = self
            .store
            .find_meal_plan(&cmd.plan_id)
            .await?
            .ok_or_else(|| EngineError::PlanNotFound(cmd.plan_id.clone()))?;

        grocery::set_entry_done(&mut plan, &cmd.date, &cmd.recipe_id, cmd.done)?;
        let saved = self.store.save_meal_plan(&plan).await?;
        Ok(saved)
    }

    /// The persisted grocery list of one plan.
    pub async fn get_grocery_list(&self, plan_id: &str) -> Result<Vec<String>, EngineError> {
        let plan = self
            .store
            .find_meal_plan(plan_id)
            .await?
            .ok_or_else(|| EngineError::PlanNotFound(plan_id.to_string()))?;
        Ok(plan.grocery_list)
    }

    /// Earliest-need attribution across all of a user's plans. Read
    /// only; the persisted lists stay untouched.
    pub async fn get_attributed_grocery_list(
        &self,
        user_id: &str,
    ) -> Result<Vec<GroceryAttribution>, EngineError> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let plans = self.store.find_meal_plans_by_user(user_id).await?;

        let mut ids: Vec<String> = Vec::new();
        for plan in &plans {
            ids.extend(plan.referenced_recipe_ids());
        }
        ids.sort();
        ids.dedup();
        let recipes_by_id: HashMap<String, Recipe> = self
            .store
            .find_recipes_by_ids(&ids)
            .await?
            .into_iter()
            .map(|recipe| (recipe.id.clone(), recipe))
            .collect();

        Ok(grocery::earliest_attributed_list(&plans, &recipes_by_id))
    }

    /// Calories of completed meals in the running week, total and per
    /// day-of-week. `today` defaults to the local date.
    pub async fn get_weekly_calories(
        &self,
        user_id: &str,
        today: Option<NaiveDate>,
    ) -> Result<WeeklyNutrition, EngineError> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let plans = self.store.find_meal_plans_by_user(user_id).await?;

        let mut ids: Vec<String> = Vec::new();
        for plan in &plans {
            ids.extend(plan.referenced_recipe_ids());
        }
        ids.sort();
        ids.dedup();
        // Deleted recipes are absent from this map and count as zero.
        let calories_by_recipe: HashMap<String, f64> = self
            .store
            .find_recipes_by_ids(&ids)
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe.calories.unwrap_or(0.0)))
            .collect();

        let today = today.unwrap_or_else(|| Local::now().date_naive());
        Ok(nutrition::weekly_rollup(&plans, &calories_by_recipe, today))
    }
}

/// Adapts the store's recipe queries to the ranker's candidate seam.
struct StoreCandidates<'a, S>(&'a S);

#[async_trait]
impl<'a, S: RecipeStore> CandidateSource for StoreCandidates<'a, S> {
    async fn find_candidates(&self, filter: &RecipeFilter) -> anyhow::Result<Vec<Recipe>> {
        self.0
            .find_recipes(filter)
            .await
            .map_err(anyhow::Error::new)
    }
}
