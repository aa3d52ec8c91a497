//! Weekly calorie roll-up over completed meals.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{MealPlan, parse_plan_date};

/// Calorie totals for the running week.
///
/// `daily_calories` is indexed by day-of-week, Sunday = 0 through
/// Saturday = 6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyNutrition {
    pub total_calories: f64,
    pub daily_calories: [f64; 7],
}

impl WeeklyNutrition {
    pub fn zero() -> Self {
        WeeklyNutrition {
            total_calories: 0.0,
            daily_calories: [0.0; 7],
        }
    }
}

/// The most recent Sunday on or before `today`.
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// Sum calories of completed meals per day-of-week within
/// `[start_of_week(today), today]`, both ends inclusive.
///
/// Only entries with `done == true` count; there is no partial credit for
/// planned-but-uncooked meals. `calories_by_recipe` maps recipe id to
/// calories; ids missing from the map (deleted recipes, never-analyzed
/// recipes) count as zero rather than failing the roll-up. Days with
/// unparseable dates are ignored.
pub fn weekly_rollup(
    plans: &[MealPlan],
    calories_by_recipe: &HashMap<String, f64>,
    today: NaiveDate,
) -> WeeklyNutrition {
    let start = start_of_week(today);
    let mut rollup = WeeklyNutrition::zero();

    for plan in plans {
        for day in &plan.days {
            let Ok(date) = parse_plan_date(&day.date) else {
                continue;
            };
            if date < start || date > today {
                continue;
            }
            let weekday = date.weekday().num_days_from_sunday() as usize;
            for meal in &day.meals {
                if !meal.done {
                    continue;
                }
                let calories = calories_by_recipe
                    .get(&meal.recipe_id)
                    .copied()
                    .unwrap_or(0.0);
                rollup.total_calories += calories;
                rollup.daily_calories[weekday] += calories;
            }
        }
    }

    rollup
}
