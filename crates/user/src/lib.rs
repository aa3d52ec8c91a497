pub mod calorie;
pub mod types;

pub use calorie::{BmiClass, CALORIE_PIVOT, CalorieRule};
pub use types::{Survey, User};
