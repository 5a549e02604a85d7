use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::audit::AuditLog;
use crate::config::AppConfig;
use crate::error::PredictError;
use crate::features::{FeatureExtractor, HeavyClient, LiteBundle};
use crate::scoring::{EngagementModel, LinearRegressor};

// Built once at startup, before the server binds; request handlers only
// ever read it. Either half may be missing, in which case requests
// hitting that half fail fast with a configuration error.
pub struct AppContext {
    pub regressor: Option<Arc<dyn EngagementModel>>,
    pub extractor: Option<FeatureExtractor>,
    pub audit: Option<AuditLog>,
}

impl AppContext {
    pub fn load(config: &AppConfig) -> Self {
        let regressor = match LinearRegressor::load(&config.models.regressor_path) {
            Ok(model) => {
                info!(
                    "engagement model loaded from {}",
                    config.models.regressor_path.display()
                );
                Some(Arc::new(model) as Arc<dyn EngagementModel>)
            }
            Err(err) => {
                error!("failed to load engagement model: {err}");
                None
            }
        };

        let extractor = match load_feature_extractor(config) {
            Ok(extractor) => {
                info!("nlp models loaded in {} mode", extractor.mode().label());
                Some(extractor)
            }
            Err(err) => {
                error!("failed to load nlp models: {err}");
                None
            }
        };

        let audit = config.audit.db_path.as_ref().and_then(|path| {
            match AuditLog::open(path) {
                Ok(log) => {
                    info!("audit log opened at {}", path.display());
                    Some(log)
                }
                Err(err) => {
                    warn!("audit log disabled: {err}");
                    None
                }
            }
        });

        Self {
            regressor,
            extractor,
            audit,
        }
    }
}

// Lite wins unconditionally when all four artifacts are on disk; heavy
// otherwise requires a configured inference endpoint.
pub fn load_feature_extractor(config: &AppConfig) -> Result<FeatureExtractor, PredictError> {
    if LiteBundle::artifacts_present(&config.models.dir) {
        let bundle = LiteBundle::load(&config.models.dir)?;
        return Ok(FeatureExtractor::Lite(bundle));
    }

    let endpoint = config.nlp.endpoint.clone().ok_or_else(|| {
        PredictError::Configuration(
            "lite model artifacts are missing and no nlp endpoint is configured".to_string(),
        )
    })?;
    let client = HeavyClient::new(endpoint, Duration::from_millis(config.nlp.timeout_ms))?;
    Ok(FeatureExtractor::Heavy(client))
}
