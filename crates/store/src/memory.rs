//! In-memory reference store.
//!
//! Backs tests and examples; real deployments plug a database client into
//! the same traits. Filter evaluation delegates to
//! [`RecipeFilter::matches`], so the reference semantics and the typed
//! predicate stay in lockstep.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;
use mealplan::MealPlan;
use recipe::{Recipe, RecipeFilter, sort_newest_first};
use user::User;

use crate::{MealPlanStore, RecipeStore, StoreError, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    recipes: RwLock<HashMap<String, Recipe>>,
    plans: RwLock<HashMap<String, MealPlan>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a user, replacing any previous record with the same id.
    pub fn put_user(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id.clone(), user);
        }
    }

    /// Seed a recipe, replacing any previous record with the same id.
    pub fn put_recipe(&self, recipe: Recipe) {
        if let Ok(mut recipes) = self.recipes.write() {
            recipes.insert(recipe.id.clone(), recipe);
        }
    }

    /// Delete a recipe, leaving any references to it dangling. Used to
    /// exercise the dangling-reference tolerance paths.
    pub fn delete_recipe(&self, id: &str) {
        if let Ok(mut recipes) = self.recipes.write() {
            recipes.remove(id);
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend(anyhow!("memory store lock poisoned"))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        Ok(recipes.get(id).cloned())
    }

    async fn find_recipes_by_ids(&self, ids: &[String]) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        Ok(ids.iter().filter_map(|id| recipes.get(id).cloned()).collect())
    }

    async fn find_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        let mut matched: Vec<Recipe> = recipes
            .values()
            .filter(|recipe| filter.matches(recipe))
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn find_recipes_liked_by(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        let mut liked: Vec<Recipe> = recipes
            .values()
            .filter(|recipe| recipe.liked_by(user_id))
            .cloned()
            .collect();
        sort_newest_first(&mut liked);
        Ok(liked)
    }
}

#[async_trait]
impl MealPlanStore for MemoryStore {
    async fn find_meal_plan(&self, id: &str) -> Result<Option<MealPlan>, StoreError> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans.get(id).cloned())
    }

    async fn find_meal_plans_by_user(&self, user_id: &str) -> Result<Vec<MealPlan>, StoreError> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        let mut owned: Vec<MealPlan> = plans
            .values()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(owned)
    }

    async fn insert_meal_plan(&self, plan: &MealPlan) -> Result<(), StoreError> {
        let mut plans = self.plans.write().map_err(|_| poisoned())?;
        plans.insert(plan.id.clone(), plan.clone());
        Ok(())
    }

    async fn save_meal_plan(&self, plan: &MealPlan) -> Result<MealPlan, StoreError> {
        let mut plans = self.plans.write().map_err(|_| poisoned())?;
        let stored = plans
            .get(&plan.id)
            .ok_or_else(|| StoreError::PlanNotFound(plan.id.clone()))?;
        if stored.version != plan.version {
            return Err(StoreError::VersionConflict {
                id: plan.id.clone(),
                expected: plan.version,
                found: stored.version,
            });
        }
        let mut updated = plan.clone();
        updated.version += 1;
        plans.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }
}
