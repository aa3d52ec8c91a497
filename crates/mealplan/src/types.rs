use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MealPlanError;

/// One planned meal: a recipe reference and its completion flag.
///
/// `done` toggles both ways (a completed meal can be un-done); it never
/// affects grocery-list membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub recipe_id: String,
    pub done: bool,
}

/// A single calendar date's planned meals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    /// Calendar date as "YYYY-MM-DD". Parsed with [`parse_plan_date`],
    /// never with a timezone-sensitive datetime parser.
    pub date: String,
    pub meals: Vec<MealEntry>,
}

/// A user's meal plan.
///
/// `grocery_list` is a derived, persisted cache: it must always be
/// recomputable from `days` plus the owner's available ingredients, holds
/// no case-insensitive duplicates, and holds nothing the owner already
/// has. The mutation helpers in [`crate::grocery`] maintain that
/// invariant; plan and list are persisted together as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub user_id: String,
    /// At most one entry per date value, in insertion order.
    pub days: Vec<PlanDay>,
    pub grocery_list: Vec<String>,
    /// Optimistic-concurrency token, bumped by the store on every save.
    pub version: u64,
}

impl MealPlan {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        MealPlan {
            id: id.into(),
            user_id: user_id.into(),
            days: Vec::new(),
            grocery_list: Vec::new(),
            version: 0,
        }
    }

    pub fn day(&self, date: &str) -> Option<&PlanDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn day_mut(&mut self, date: &str) -> Option<&mut PlanDay> {
        self.days.iter_mut().find(|day| day.date == date)
    }

    /// Every recipe id referenced anywhere in the plan, deduplicated,
    /// in scan order.
    pub fn referenced_recipe_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut ids = Vec::new();
        for day in &self.days {
            for meal in &day.meals {
                if seen.insert(meal.recipe_id.clone()) {
                    ids.push(meal.recipe_id.clone());
                }
            }
        }
        ids
    }
}

/// Parse a plan-day date of the form "YYYY-MM-DD".
///
/// Split on `-` and construct the calendar date directly. Feeding the
/// string to a datetime parser would interpret it as UTC midnight and
/// shift the day in western timezones; constructing from the components
/// keeps the date exactly as written.
pub fn parse_plan_date(date: &str) -> Result<NaiveDate, MealPlanError> {
    let invalid = || MealPlanError::InvalidDate(date.to_string());

    let mut parts = date.split('-');
    let year = parts.next().and_then(|p| p.parse::<i32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.parse::<u32>().ok());
    if parts.next().is_some() {
        return Err(invalid());
    }

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => {
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}
