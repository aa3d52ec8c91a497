//! Wall-clock hour to meal-time slot.

use chrono::{NaiveDateTime, Timelike};
use recipe::MealTime;

/// Resolve an hour of day (0..=23) to the slot to prioritize right now.
///
/// Lunch covers 11:00-14:59, dinner 15:00-19:59, snack the late evening
/// and small hours (20:00-05:59); everything left, the morning, is
/// breakfast.
pub fn meal_slot_for_hour(hour: u32) -> MealTime {
    match hour {
        11..=14 => MealTime::Lunch,
        15..=19 => MealTime::Dinner,
        20..=23 | 0..=5 => MealTime::Snack,
        _ => MealTime::Breakfast,
    }
}

/// Slot for an injected local timestamp. Callers supply "now" explicitly
/// so tests never depend on process time.
pub fn meal_slot_at(now: NaiveDateTime) -> MealTime {
    meal_slot_for_hour(now.hour())
}
