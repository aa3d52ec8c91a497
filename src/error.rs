use mealplan::MealPlanError;
use recommendation::RecommendationError;
use store::StoreError;
use thiserror::Error;

/// Coarse failure category, stable across error variants. HTTP mappers
/// and callers branch on this instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Internal,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("meal plan not found: {0}")]
    PlanNotFound(String),

    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("no meal entry for recipe {recipe_id} on {date}")]
    EntryNotFound { date: String, recipe_id: String },

    #[error("recipe {recipe_id} is already planned for {date}")]
    DuplicateEntry { date: String, recipe_id: String },

    /// Another caller updated the plan between our read and our write.
    /// Nothing was lost; the operation can be retried on a fresh read.
    #[error("meal plan {0} was modified concurrently")]
    ConcurrentUpdate(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UserNotFound(_)
            | EngineError::PlanNotFound(_)
            | EngineError::RecipeNotFound(_)
            | EngineError::EntryNotFound { .. } => ErrorKind::NotFound,
            EngineError::DuplicateEntry { .. } | EngineError::ConcurrentUpdate(_) => {
                ErrorKind::Conflict
            }
            EngineError::InvalidInput(_) => ErrorKind::InvalidInput,
            EngineError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { id, .. } => EngineError::ConcurrentUpdate(id),
            StoreError::PlanNotFound(id) => EngineError::PlanNotFound(id),
            StoreError::Backend(err) => EngineError::Store(err),
        }
    }
}

impl From<MealPlanError> for EngineError {
    fn from(err: MealPlanError) -> Self {
        match err {
            MealPlanError::DuplicateEntry { date, recipe_id } => {
                EngineError::DuplicateEntry { date, recipe_id }
            }
            MealPlanError::EntryNotFound { date, recipe_id } => {
                EngineError::EntryNotFound { date, recipe_id }
            }
            MealPlanError::InvalidDate(date) => {
                EngineError::InvalidInput(format!("invalid calendar date: {date}"))
            }
        }
    }
}

impl From<RecommendationError> for EngineError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::Source(err) => EngineError::Store(err),
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}
