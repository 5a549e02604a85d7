pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod scoring;

use serde::{Deserialize, Serialize};

pub use context::{load_feature_extractor, AppContext};
pub use error::{PredictError, ScoringError};

use crate::features::CanonicalFeatures;
use crate::scoring::{build_grid, score_batch, select_best};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub platform: String,
    pub followers: u64,
    pub account_age_days: u32,
    pub verified: bool,
    pub media_type: String,
    pub location: String,
    pub caption: String,
    pub cross_platform_spread: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub best_day: u8,
    pub best_hour: u8,
    pub predicted_engagement: f64,
    pub nlp_insights: CanonicalFeatures,
}

pub async fn predict(
    context: &AppContext,
    request: &PredictRequest,
) -> Result<PredictionResult, PredictError> {
    let extractor = context.extractor.as_ref().ok_or_else(|| {
        PredictError::Configuration("nlp models are not loaded".to_string())
    })?;
    let model = context.regressor.as_ref().ok_or_else(|| {
        PredictError::Configuration("engagement model is not loaded".to_string())
    })?;

    let features = extractor.extract(&request.caption).await?;
    let rows = build_grid(request, &features);
    let scores = score_batch(model.as_ref(), &rows)?;
    let best = select_best(&rows, &scores).ok_or(ScoringError::EmptyBatch)?;

    Ok(PredictionResult {
        best_day: best.day_of_week,
        best_hour: best.hour_of_day,
        predicted_engagement: best.score,
        nlp_insights: features,
    })
}
