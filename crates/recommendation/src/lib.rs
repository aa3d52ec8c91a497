pub mod error;
pub mod meal_time;
pub mod ranker;
pub mod signals;

pub use error::RecommendationError;
pub use meal_time::{meal_slot_at, meal_slot_for_hour};
pub use ranker::{CandidateSource, RankerConfig, Recommendations, recommend};
pub use signals::UserSignals;
