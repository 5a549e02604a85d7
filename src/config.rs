use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::PredictError;
use crate::scoring::REGRESSOR_FILE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub dir: PathBuf,
    pub regressor_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let dir = PathBuf::from("models");
        let regressor_path = dir.join(REGRESSOR_FILE);
        Self {
            dir,
            regressor_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub models: ModelConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), PredictError> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path).map_err(|err| {
                    PredictError::Configuration(format!("failed to read config: {err}"))
                })?;
                toml::from_str(&contents).map_err(|err| {
                    PredictError::Configuration(format!("failed to parse config: {err}"))
                })?
            } else {
                AppConfig::default()
            }
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), PredictError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                PredictError::Configuration(format!("failed to create config dir: {err}"))
            })?;
        }
        let payload = toml::to_string_pretty(self).map_err(|err| {
            PredictError::Configuration(format!("failed to serialize config: {err}"))
        })?;
        std::fs::write(path, payload)
            .map_err(|err| PredictError::Configuration(format!("failed to write config: {err}")))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("MODEL_DIR") {
            if !dir.trim().is_empty() {
                self.models.dir = PathBuf::from(&dir);
                self.models.regressor_path = PathBuf::from(dir).join(REGRESSOR_FILE);
            }
        }
        if let Ok(path) = env::var("REGRESSOR_PATH") {
            if !path.trim().is_empty() {
                self.models.regressor_path = PathBuf::from(path);
            }
        }
        if let Ok(endpoint) = env::var("NLP_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.nlp.endpoint = Some(endpoint);
            }
        }
        if let Ok(timeout) = env::var("NLP_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.nlp.timeout_ms = value;
            }
        }
        if let Ok(path) = env::var("AUDIT_DB_PATH") {
            if !path.trim().is_empty() {
                self.audit.db_path = Some(PathBuf::from(path));
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("PREDICTOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/predictor.toml")))
}
