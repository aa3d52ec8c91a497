//! MealMate recommendation & meal-plan aggregation engine.
//!
//! Derives personalized recipe rankings from behavioral signals, keeps a
//! deduplicated grocery list in step with a multi-week meal plan, and
//! rolls up weekly nutrition per day-of-week. Persistence, transport and
//! the surrounding CRUD surface live outside; the engine consumes the
//! storage traits in [`store`] and exposes [`Engine`] upward.

pub mod commands;
pub mod engine;
pub mod error;

pub use commands::{
    AddRecipeToPlanCommand, CreateMealPlanCommand, MarkMealDoneCommand,
    RemoveRecipeFromPlanCommand,
};
pub use engine::Engine;
pub use error::{EngineError, ErrorKind};

pub use mealplan::{GroceryAttribution, MealEntry, MealPlan, PlanDay, WeeklyNutrition};
pub use recipe::{Diet, MealTime, Recipe, StringOrList, normalize_ingredients, normalize_tags};
pub use recommendation::{RankerConfig, Recommendations, UserSignals};
pub use store::{MealPlanStore, MemoryStore, RecipeStore, StoreError, UserStore};
pub use user::{BmiClass, CalorieRule, Survey, User};
