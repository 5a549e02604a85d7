use best_time::PredictRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ApiPredictRequest {
    pub platform: Option<String>,
    pub followers: Option<u64>,
    pub account_age_days: Option<u32>,
    pub verified: Option<bool>,
    pub media_type: Option<String>,
    pub location: Option<String>,
    pub caption: Option<String>,
    pub cross_platform_spread: Option<bool>,
}

impl ApiPredictRequest {
    pub fn into_request(self) -> Result<PredictRequest, String> {
        let platform = required_field(self.platform, "platform")?;
        let media_type = required_field(self.media_type, "media_type")?;
        let location = required_field(self.location, "location")?;

        Ok(PredictRequest {
            platform,
            followers: self.followers.unwrap_or(0),
            account_age_days: self.account_age_days.unwrap_or(0),
            verified: self.verified.unwrap_or(false),
            media_type,
            location,
            caption: self.caption.unwrap_or_default(),
            cross_platform_spread: self.cross_platform_spread.unwrap_or(false),
        })
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String, String> {
    let value = value.unwrap_or_default().trim().to_string();
    if value.is_empty() {
        return Err(format!("{name} is required"));
    }
    Ok(value)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub nlp_mode: Option<&'static str>,
    pub regressor_loaded: bool,
}
