pub mod error;
pub mod grocery;
pub mod nutrition;
pub mod types;

pub use error::MealPlanError;
pub use grocery::{GroceryAttribution, add_recipe, earliest_attributed_list, remove_recipe, set_entry_done};
pub use nutrition::{WeeklyNutrition, weekly_rollup};
pub use types::{MealEntry, MealPlan, PlanDay, parse_plan_date};
