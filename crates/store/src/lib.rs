//! Storage capabilities consumed by the engine.
//!
//! Persistence is an external collaborator: the engine only sees these
//! traits, issuing whole-document reads and writes. Writes to meal plans
//! are optimistic; every plan carries a version and a stale save is
//! rejected instead of silently overwriting a concurrent update.

pub mod memory;

use async_trait::async_trait;
use mealplan::MealPlan;
use recipe::{Recipe, RecipeFilter};
use thiserror::Error;
use user::User;

pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A save raced a concurrent update of the same plan. The caller
    /// re-reads and retries or surfaces the conflict; the store never
    /// drops either write.
    #[error("meal plan {id} version conflict: expected {expected}, found {found}")]
    VersionConflict { id: String, expected: u64, found: u64 },

    #[error("meal plan not found: {0}")]
    PlanNotFound(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Fetch the recipes for the given ids. Ids that no longer resolve
    /// are omitted from the result, not errors; dangling references are
    /// the caller's tolerance policy.
    async fn find_recipes_by_ids(&self, ids: &[String]) -> Result<Vec<Recipe>, StoreError>;

    /// Evaluate a typed predicate. Results are ordered newest first
    /// (creation time, ids breaking ties) and truncated to the filter's
    /// limit.
    async fn find_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError>;

    /// All recipes the given user has liked.
    async fn find_recipes_liked_by(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError>;
}

#[async_trait]
pub trait MealPlanStore: Send + Sync {
    async fn find_meal_plan(&self, id: &str) -> Result<Option<MealPlan>, StoreError>;
    async fn find_meal_plans_by_user(&self, user_id: &str) -> Result<Vec<MealPlan>, StoreError>;

    /// Persist a brand-new plan (version 0).
    async fn insert_meal_plan(&self, plan: &MealPlan) -> Result<(), StoreError>;

    /// Persist plan mutations as one unit, checking the version. Returns
    /// the stored plan with its bumped version.
    async fn save_meal_plan(&self, plan: &MealPlan) -> Result<MealPlan, StoreError>;
}
