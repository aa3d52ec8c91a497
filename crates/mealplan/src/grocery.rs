//! Grocery-list aggregation over a meal plan.
//!
//! The persisted `grocery_list` is maintained incrementally on additions
//! and rebuilt from scratch on removals. The rebuild is intentionally not
//! incremental: an ingredient can be required by several entries across
//! several days, and only the whole-plan view knows whether it is still
//! needed. The recompute is O(remaining entries) and makes the list
//! self-healing on the next mutation after a crash.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use recipe::{Recipe, normalize_key};
use serde::{Deserialize, Serialize};

use crate::error::MealPlanError;
use crate::types::{MealEntry, MealPlan, PlanDay, parse_plan_date};

/// Add a recipe to the plan-day for `date`, growing the grocery list.
///
/// Creates the day when it does not exist yet. A second entry for the
/// same recipe on the same day is a conflict and leaves the plan
/// untouched. New grocery entries keep their original casing; an
/// ingredient already on the list (case-insensitive) or already owned by
/// the user is skipped.
pub fn add_recipe(
    plan: &mut MealPlan,
    date: &str,
    recipe: &Recipe,
    available_ingredients: &[String],
) -> Result<(), MealPlanError> {
    parse_plan_date(date)?;

    if let Some(day) = plan.day(date) {
        if day.meals.iter().any(|meal| meal.recipe_id == recipe.id) {
            return Err(MealPlanError::DuplicateEntry {
                date: date.to_string(),
                recipe_id: recipe.id.clone(),
            });
        }
    }

    match plan.day_mut(date) {
        Some(day) => day.meals.push(MealEntry {
            recipe_id: recipe.id.clone(),
            done: false,
        }),
        None => plan.days.push(PlanDay {
            date: date.to_string(),
            meals: vec![MealEntry {
                recipe_id: recipe.id.clone(),
                done: false,
            }],
        }),
    }

    let owned: HashSet<String> = available_ingredients.iter().map(|i| normalize_key(i)).collect();
    let mut listed: HashSet<String> = plan.grocery_list.iter().map(|i| normalize_key(i)).collect();
    for ingredient in &recipe.ingredients {
        let key = normalize_key(ingredient);
        if owned.contains(&key) || listed.contains(&key) {
            continue;
        }
        listed.insert(key);
        plan.grocery_list.push(ingredient.clone());
    }

    Ok(())
}

/// Remove the entry for `recipe_id` on `date` and rebuild the grocery
/// list.
///
/// The rebuild keeps only previous list items still required by some
/// remaining entry anywhere in the plan, preserving their order.
/// `ingredients_by_recipe` supplies the ingredient lists of every recipe
/// the plan might still reference; ids missing from the map (deleted
/// recipes) simply contribute nothing.
pub fn remove_recipe(
    plan: &mut MealPlan,
    date: &str,
    recipe_id: &str,
    ingredients_by_recipe: &HashMap<String, Vec<String>>,
) -> Result<(), MealPlanError> {
    parse_plan_date(date)?;

    let entry_not_found = || MealPlanError::EntryNotFound {
        date: date.to_string(),
        recipe_id: recipe_id.to_string(),
    };

    let day = plan.day_mut(date).ok_or_else(entry_not_found)?;
    let index = day
        .meals
        .iter()
        .position(|meal| meal.recipe_id == recipe_id)
        .ok_or_else(entry_not_found)?;
    day.meals.remove(index);

    let mut required: HashSet<String> = HashSet::new();
    for id in plan.referenced_recipe_ids() {
        if let Some(ingredients) = ingredients_by_recipe.get(&id) {
            required.extend(ingredients.iter().map(|i| normalize_key(i)));
        }
    }
    plan.grocery_list
        .retain(|item| required.contains(&normalize_key(item)));

    Ok(())
}

/// Flip the completion flag of one meal entry.
///
/// The transition is symmetric (done and back again) and deliberately
/// leaves the grocery list alone.
pub fn set_entry_done(
    plan: &mut MealPlan,
    date: &str,
    recipe_id: &str,
    done: bool,
) -> Result<(), MealPlanError> {
    parse_plan_date(date)?;

    let entry = plan
        .day_mut(date)
        .and_then(|day| day.meals.iter_mut().find(|meal| meal.recipe_id == recipe_id))
        .ok_or_else(|| MealPlanError::EntryNotFound {
            date: date.to_string(),
            recipe_id: recipe_id.to_string(),
        })?;
    entry.done = done;
    Ok(())
}

/// One line of the earliest-attributed grocery view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryAttribution {
    pub ingredient: String,
    /// Earliest plan-day date on which some meal needs the ingredient.
    pub first_needed_on: NaiveDate,
    /// Title of the recipe scheduled on that earliest date.
    pub recipe_title: String,
}

/// Earliest-need attribution across all of a user's plans.
///
/// Read-only: never touches any persisted `grocery_list`. Plans, days
/// and meals are scanned in stored order; for each distinct ingredient
/// (case-insensitive) the earliest date wins and date ties keep the
/// first-seen recipe. Days with unparseable dates and dangling recipe
/// references are skipped.
pub fn earliest_attributed_list(
    plans: &[MealPlan],
    recipes_by_id: &HashMap<String, Recipe>,
) -> Vec<GroceryAttribution> {
    let mut order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, GroceryAttribution> = HashMap::new();

    for plan in plans {
        for day in &plan.days {
            let Ok(date) = parse_plan_date(&day.date) else {
                continue;
            };
            for meal in &day.meals {
                let Some(recipe) = recipes_by_id.get(&meal.recipe_id) else {
                    continue;
                };
                for ingredient in &recipe.ingredients {
                    match entries.entry(normalize_key(ingredient)) {
                        Entry::Vacant(vacant) => {
                            order.push(vacant.key().clone());
                            vacant.insert(GroceryAttribution {
                                ingredient: ingredient.clone(),
                                first_needed_on: date,
                                recipe_title: recipe.title.clone(),
                            });
                        }
                        Entry::Occupied(mut occupied) => {
                            let existing = occupied.get_mut();
                            // Strictly earlier only; a tie keeps the
                            // first-seen recipe.
                            if date < existing.first_needed_on {
                                existing.first_needed_on = date;
                                existing.recipe_title = recipe.title.clone();
                            }
                        }
                    }
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| entries.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use recipe::{Diet, MealTime};

    fn recipe(id: &str, title: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            instructions: vec![],
            tags: vec![],
            diet: Diet::None,
            meal_time: MealTime::Dinner,
            calories: Some(500.0),
            likes: vec![],
            is_public: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn ingredient_map(recipes: &[&Recipe]) -> HashMap<String, Vec<String>> {
        recipes
            .iter()
            .map(|r| (r.id.clone(), r.ingredients.clone()))
            .collect()
    }

    #[test]
    fn add_creates_day_and_grows_grocery_list() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta", "Garlic", "Olive Oil"]);

        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();

        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].meals.len(), 1);
        assert!(!plan.days[0].meals[0].done);
        assert_eq!(plan.grocery_list, vec!["Pasta", "Garlic", "Olive Oil"]);
    }

    #[test]
    fn add_skips_owned_and_already_listed_ingredients() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta", "Garlic"]);
        let stew = recipe("r2", "Stew", &["garlic", "Carrots", "Salt"]);

        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        add_recipe(&mut plan, "2024-03-05", &stew, &["salt".to_string()]).unwrap();

        // "garlic" already listed (case-insensitive), "Salt" owned.
        assert_eq!(plan.grocery_list, vec!["Pasta", "Garlic", "Carrots"]);
    }

    #[test]
    fn duplicate_day_recipe_pair_is_a_conflict() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta"]);

        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        let err = add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap_err();

        assert_eq!(
            err,
            MealPlanError::DuplicateEntry {
                date: "2024-03-04".to_string(),
                recipe_id: "r1".to_string(),
            }
        );
        // Same recipe on a different day is fine.
        add_recipe(&mut plan, "2024-03-05", &pasta, &[]).unwrap();
        assert_eq!(plan.days.len(), 2);
    }

    #[test]
    fn malformed_date_is_rejected_before_any_mutation() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta"]);

        let err = add_recipe(&mut plan, "not-a-date", &pasta, &[]).unwrap_err();
        assert!(matches!(err, MealPlanError::InvalidDate(_)));
        assert!(plan.days.is_empty());
        assert!(plan.grocery_list.is_empty());
    }

    #[test]
    fn remove_keeps_ingredients_still_required_elsewhere() {
        let mut plan = MealPlan::new("p1", "u1");
        let early = recipe("r1", "Garlic Bread", &["Garlic", "Bread"]);
        let late = recipe("r2", "Garlic Soup", &["Garlic", "Stock"]);
        add_recipe(&mut plan, "2024-03-04", &early, &[]).unwrap();
        add_recipe(&mut plan, "2024-03-06", &late, &[]).unwrap();

        let map = ingredient_map(&[&early, &late]);
        remove_recipe(&mut plan, "2024-03-06", "r2", &map).unwrap();

        // Garlic survives via the earlier recipe, stock is gone.
        assert_eq!(plan.grocery_list, vec!["Garlic", "Bread"]);

        remove_recipe(&mut plan, "2024-03-04", "r1", &map).unwrap();
        assert!(plan.grocery_list.is_empty());
    }

    #[test]
    fn add_then_remove_round_trips_the_grocery_list() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta", "Garlic"]);
        let cake = recipe("r2", "Cake", &["Flour", "Sugar"]);
        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        let before = plan.grocery_list.clone();

        let map = ingredient_map(&[&pasta, &cake]);
        add_recipe(&mut plan, "2024-03-05", &cake, &[]).unwrap();
        remove_recipe(&mut plan, "2024-03-05", "r2", &map).unwrap();

        assert_eq!(plan.grocery_list, before);
    }

    #[test]
    fn remove_of_absent_entry_is_not_found_and_mutates_nothing() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta"]);
        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        let snapshot = plan.clone();

        let map = ingredient_map(&[&pasta]);
        let err = remove_recipe(&mut plan, "2024-03-04", "r9", &map).unwrap_err();
        assert!(matches!(err, MealPlanError::EntryNotFound { .. }));
        let err = remove_recipe(&mut plan, "2024-03-09", "r1", &map).unwrap_err();
        assert!(matches!(err, MealPlanError::EntryNotFound { .. }));

        assert_eq!(plan, snapshot);
    }

    #[test]
    fn dangling_reference_contributes_nothing_on_recompute() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta"]);
        let ghost = recipe("r2", "Ghost", &["Ectoplasm"]);
        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        add_recipe(&mut plan, "2024-03-05", &ghost, &[]).unwrap();

        // r2 has been deleted by the time of the removal; its ingredients
        // are simply no longer required.
        let map = ingredient_map(&[&pasta]);
        remove_recipe(&mut plan, "2024-03-04", "r1", &map).unwrap();
        assert!(plan.grocery_list.is_empty());
    }

    #[test]
    fn done_flag_toggles_without_touching_groceries() {
        let mut plan = MealPlan::new("p1", "u1");
        let pasta = recipe("r1", "Pasta", &["Pasta"]);
        add_recipe(&mut plan, "2024-03-04", &pasta, &[]).unwrap();
        let groceries = plan.grocery_list.clone();

        set_entry_done(&mut plan, "2024-03-04", "r1", true).unwrap();
        assert!(plan.days[0].meals[0].done);
        set_entry_done(&mut plan, "2024-03-04", "r1", false).unwrap();
        assert!(!plan.days[0].meals[0].done);
        assert_eq!(plan.grocery_list, groceries);

        let err = set_entry_done(&mut plan, "2024-03-04", "r9", true).unwrap_err();
        assert!(matches!(err, MealPlanError::EntryNotFound { .. }));
    }

    #[test]
    fn attribution_picks_earliest_date_and_first_seen_on_ties() {
        let mut plan = MealPlan::new("p1", "u1");
        let soup = recipe("r1", "Garlic Soup", &["Garlic", "Stock"]);
        let bread = recipe("r2", "Garlic Bread", &["Garlic", "Bread"]);
        add_recipe(&mut plan, "2024-03-06", &soup, &[]).unwrap();
        add_recipe(&mut plan, "2024-03-04", &bread, &[]).unwrap();

        let index: HashMap<String, Recipe> = [&soup, &bread]
            .into_iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();
        let view = earliest_attributed_list(std::slice::from_ref(&plan), &index);

        let garlic = view.iter().find(|a| a.ingredient == "Garlic").unwrap();
        assert_eq!(
            garlic.first_needed_on,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(garlic.recipe_title, "Garlic Bread");

        // Same-date tie keeps the recipe seen first during the scan.
        let mut tie = MealPlan::new("p2", "u1");
        add_recipe(&mut tie, "2024-03-04", &soup, &[]).unwrap();
        add_recipe(&mut tie, "2024-03-04", &bread, &[]).unwrap();
        let view = earliest_attributed_list(std::slice::from_ref(&tie), &index);
        let garlic = view.iter().find(|a| a.ingredient == "Garlic").unwrap();
        assert_eq!(garlic.recipe_title, "Garlic Soup");
    }

    #[test]
    fn attribution_spans_plans_and_skips_dangling_references() {
        let mut weekday = MealPlan::new("p1", "u1");
        let soup = recipe("r1", "Garlic Soup", &["Garlic"]);
        add_recipe(&mut weekday, "2024-03-10", &soup, &[]).unwrap();

        let mut weekend = MealPlan::new("p2", "u1");
        let bread = recipe("r2", "Garlic Bread", &["Garlic"]);
        let ghost = recipe("r3", "Ghost", &["Ectoplasm"]);
        add_recipe(&mut weekend, "2024-03-02", &bread, &[]).unwrap();
        add_recipe(&mut weekend, "2024-03-01", &ghost, &[]).unwrap();

        // r3 deleted afterwards: absent from the index.
        let index: HashMap<String, Recipe> = [&soup, &bread]
            .into_iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();

        let view = earliest_attributed_list(&[weekday, weekend], &index);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].ingredient, "Garlic");
        assert_eq!(view[0].recipe_title, "Garlic Bread");
        assert_eq!(
            view[0].first_needed_on,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }
}
