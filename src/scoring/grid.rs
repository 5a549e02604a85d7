use serde::Serialize;

use crate::features::CanonicalFeatures;
use crate::PredictRequest;

pub const DAYS_PER_WEEK: u8 = 7;
pub const HOURS_PER_DAY: u8 = 24;
pub const SLOT_COUNT: usize = DAYS_PER_WEEK as usize * HOURS_PER_DAY as usize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub platform: String,
    pub followers: u64,
    pub account_age_days: u32,
    pub verified: bool,
    pub media_type: String,
    pub location: String,
    pub cross_platform_spread: bool,
    pub topic: String,
    pub language: String,
    pub content_length: usize,
    pub num_hashtags: usize,
    pub sentiment_positive: f64,
    pub sentiment_negative: f64,
    pub sentiment_neutral: f64,
    pub sentiment_category: String,
    pub toxicity_score: f64,
    pub day_of_week: u8,
    pub hour_of_day: u8,
}

// Day-major, hour-minor enumeration order; the selector's tie-break
// depends on it.
pub fn build_grid(request: &PredictRequest, features: &CanonicalFeatures) -> Vec<CandidateRow> {
    let mut rows = Vec::with_capacity(SLOT_COUNT);
    for day in 0..DAYS_PER_WEEK {
        for hour in 0..HOURS_PER_DAY {
            rows.push(CandidateRow {
                platform: request.platform.clone(),
                followers: request.followers,
                account_age_days: request.account_age_days,
                verified: request.verified,
                media_type: request.media_type.clone(),
                location: request.location.clone(),
                cross_platform_spread: request.cross_platform_spread,
                topic: features.topic.clone(),
                language: features.language.clone(),
                content_length: features.content_length,
                num_hashtags: features.num_hashtags,
                sentiment_positive: features.sentiment_positive,
                sentiment_negative: features.sentiment_negative,
                sentiment_neutral: features.sentiment_neutral,
                sentiment_category: features.sentiment_category.clone(),
                toxicity_score: features.toxicity_score,
                day_of_week: day,
                hour_of_day: hour,
            });
        }
    }
    rows
}
