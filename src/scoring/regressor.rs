use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{PredictError, ScoringError};
use crate::scoring::grid::{CandidateRow, DAYS_PER_WEEK, HOURS_PER_DAY};

pub const REGRESSOR_FILE: &str = "engagement_model.json";

pub trait EngagementModel: Send + Sync {
    fn predict_batch(&self, rows: &[CandidateRow]) -> Result<Vec<f64>, ScoringError>;
}

pub fn score_batch(
    model: &dyn EngagementModel,
    rows: &[CandidateRow],
) -> Result<Vec<f64>, ScoringError> {
    let scores = model.predict_batch(rows)?;
    if scores.len() != rows.len() {
        return Err(ScoringError::ScoreCountMismatch {
            expected: rows.len(),
            actual: scores.len(),
        });
    }
    Ok(scores)
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumericWeights {
    pub followers: f64,
    pub account_age_days: f64,
    pub verified: f64,
    pub cross_platform_spread: f64,
    pub content_length: f64,
    pub num_hashtags: f64,
    pub sentiment_positive: f64,
    pub sentiment_negative: f64,
    pub sentiment_neutral: f64,
    pub toxicity_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressor {
    bias: f64,
    numeric: NumericWeights,
    platform: HashMap<String, f64>,
    media_type: HashMap<String, f64>,
    location: HashMap<String, f64>,
    topic: HashMap<String, f64>,
    language: HashMap<String, f64>,
    sentiment_category: HashMap<String, f64>,
    day_of_week: Vec<f64>,
    hour_of_day: Vec<f64>,
}

impl LinearRegressor {
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            PredictError::Configuration(format!("failed to read {}: {err}", path.display()))
        })?;
        let model: LinearRegressor = serde_json::from_str(&contents).map_err(|err| {
            PredictError::Configuration(format!("failed to parse {}: {err}", path.display()))
        })?;
        model.validate().map_err(|err| {
            PredictError::Configuration(format!("invalid regressor {}: {err}", path.display()))
        })?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), String> {
        if self.day_of_week.len() != DAYS_PER_WEEK as usize {
            return Err(format!(
                "day_of_week has {} weights, expected {}",
                self.day_of_week.len(),
                DAYS_PER_WEEK
            ));
        }
        if self.hour_of_day.len() != HOURS_PER_DAY as usize {
            return Err(format!(
                "hour_of_day has {} weights, expected {}",
                self.hour_of_day.len(),
                HOURS_PER_DAY
            ));
        }
        Ok(())
    }

    fn predict_row(&self, row: &CandidateRow) -> Result<f64, ScoringError> {
        let numeric = &self.numeric;
        let mut score = self.bias;
        score += numeric.followers * row.followers as f64;
        score += numeric.account_age_days * row.account_age_days as f64;
        score += numeric.verified * bool_to_f64(row.verified);
        score += numeric.cross_platform_spread * bool_to_f64(row.cross_platform_spread);
        score += numeric.content_length * row.content_length as f64;
        score += numeric.num_hashtags * row.num_hashtags as f64;
        score += numeric.sentiment_positive * row.sentiment_positive;
        score += numeric.sentiment_negative * row.sentiment_negative;
        score += numeric.sentiment_neutral * row.sentiment_neutral;
        score += numeric.toxicity_score * row.toxicity_score;

        score += category_weight(&self.platform, "platform", &row.platform)?;
        score += category_weight(&self.media_type, "media_type", &row.media_type)?;
        score += category_weight(&self.location, "location", &row.location)?;
        score += category_weight(&self.topic, "topic", &row.topic)?;
        score += category_weight(&self.language, "language", &row.language)?;
        score += category_weight(
            &self.sentiment_category,
            "sentiment_category",
            &row.sentiment_category,
        )?;

        score += slot_weight(&self.day_of_week, "day_of_week", row.day_of_week)?;
        score += slot_weight(&self.hour_of_day, "hour_of_day", row.hour_of_day)?;
        Ok(score)
    }
}

impl EngagementModel for LinearRegressor {
    fn predict_batch(&self, rows: &[CandidateRow]) -> Result<Vec<f64>, ScoringError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

fn category_weight(
    table: &HashMap<String, f64>,
    field: &'static str,
    value: &str,
) -> Result<f64, ScoringError> {
    table
        .get(value)
        .copied()
        .ok_or_else(|| ScoringError::UnknownCategory {
            field,
            value: value.to_string(),
        })
}

fn slot_weight(weights: &[f64], field: &'static str, index: u8) -> Result<f64, ScoringError> {
    weights
        .get(index as usize)
        .copied()
        .ok_or_else(|| ScoringError::UnknownCategory {
            field,
            value: index.to_string(),
        })
}

fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
