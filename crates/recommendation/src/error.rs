use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("candidate query failed: {0}")]
    Source(#[from] anyhow::Error),
}
