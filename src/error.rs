use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown {field} category: {value}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("regressor returned {actual} scores for {expected} rows")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("empty candidate batch")]
    EmptyBatch,
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("nlp inference failed: {0}")]
    Extraction(String),
}
