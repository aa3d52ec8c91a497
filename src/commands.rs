//! Engine command inputs, validated before any storage access.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Validate a plan-day date string ("YYYY-MM-DD") without touching state.
fn validate_plan_date(date: &str) -> Result<(), ValidationError> {
    match mealplan::parse_plan_date(date) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("invalid_plan_date");
            error.message = Some(std::borrow::Cow::from(
                "Date must be a valid calendar date of the form YYYY-MM-DD",
            ));
            Err(error)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMealPlanCommand {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddRecipeToPlanCommand {
    #[validate(length(min = 1, message = "Plan id is required"))]
    pub plan_id: String,

    #[validate(custom(function = "validate_plan_date"))]
    pub date: String,

    #[validate(length(min = 1, message = "Recipe id is required"))]
    pub recipe_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoveRecipeFromPlanCommand {
    #[validate(length(min = 1, message = "Plan id is required"))]
    pub plan_id: String,

    #[validate(custom(function = "validate_plan_date"))]
    pub date: String,

    #[validate(length(min = 1, message = "Recipe id is required"))]
    pub recipe_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MarkMealDoneCommand {
    #[validate(length(min = 1, message = "Plan id is required"))]
    pub plan_id: String,

    #[validate(custom(function = "validate_plan_date"))]
    pub date: String,

    #[validate(length(min = 1, message = "Recipe id is required"))]
    pub recipe_id: String,

    pub done: bool,
}
