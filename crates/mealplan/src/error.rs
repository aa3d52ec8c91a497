use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MealPlanError {
    #[error("recipe {recipe_id} is already planned for {date}")]
    DuplicateEntry { date: String, recipe_id: String },

    #[error("no meal entry for recipe {recipe_id} on {date}")]
    EntryNotFound { date: String, recipe_id: String },

    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}
