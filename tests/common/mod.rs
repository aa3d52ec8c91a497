#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use mealmate::{Diet, MealTime, MemoryStore, Recipe, Survey, User};

static TRACING: Once = Once::new();

/// Route engine logs through the test writer; `RUST_LOG` controls the
/// filter as usual.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn created_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn recipe(id: &str, title: &str, meal_time: MealTime, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        instructions: vec!["cook".to_string()],
        tags: vec![],
        diet: Diet::None,
        meal_time,
        calories: Some(300.0),
        likes: vec![],
        is_public: true,
        created_at: created_on(1),
    }
}

pub fn user(id: &str, name: &str) -> User {
    User::new(id, name)
}

pub fn user_with_profile(id: &str, height_cm: f64, weight_kg: f64) -> User {
    let mut user = User::new(id, "Profiled");
    user.survey = Some(Survey {
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
        ..Default::default()
    });
    user
}

/// Store pre-seeded with one plain user.
pub fn seeded_store(user_id: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.put_user(user(user_id, "Tester"));
    store
}
