// src/config.rs

use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

pub const ENV_CONFIG_FILE: &str = "GOLD_PREDICTOR_CONFIG";
pub const ENV_BASE_DIR: &str = "GOLD_PREDICTOR_BASE_DIR";
pub const ENV_HOST: &str = "GOLD_PREDICTOR_HOST";
pub const ENV_PORT: &str = "GOLD_PREDICTOR_PORT";
pub const ENV_VALIDATE: &str = "GOLD_PREDICTOR_VALIDATE";
pub const ENV_CHART_MODE: &str = "GOLD_PREDICTOR_CHART_MODE";
pub const ENV_CACHE: &str = "GOLD_PREDICTOR_CACHE";
pub const ENV_STATIC_DIR: &str = "GOLD_PREDICTOR_STATIC_DIR";

/// What the chart series covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// A single `(rate, prediction)` point.
    Point,
    /// An evenly spaced sweep around the requested rate.
    Range,
}

impl FromStr for ChartMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(ChartMode::Point),
            "range" => Ok(ChartMode::Range),
            other => Err(ConfigError::InvalidEnv {
                key: ENV_CHART_MODE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A selectable model: display name and artifact path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Application configuration, injected into the handler and server at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory relative artifact paths are resolved against
    pub base_dir: PathBuf,
    pub scaler_path: PathBuf,
    /// Ordered model mapping, in the order the UI lists it
    pub models: Vec<ModelEntry>,
    pub default_model: String,
    /// Reject non-positive exchange rates before touching any artifact
    pub validate_input: bool,
    pub chart_mode: ChartMode,
    pub range_points: usize,
    /// Half-width of the range sweep as a fraction of the rate
    pub range_span: f64,
    pub round_decimals: Option<u32>,
    pub cache_artifacts: bool,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("artifacts"),
            scaler_path: PathBuf::from("scaler.json"),
            models: vec![
                ModelEntry {
                    name: "Linear Regression".to_string(),
                    path: PathBuf::from("linear_regression.json"),
                },
                ModelEntry {
                    name: "Ridge Regression".to_string(),
                    path: PathBuf::from("ridge_regression.json"),
                },
            ],
            default_model: "Linear Regression".to_string(),
            validate_input: true,
            chart_mode: ChartMode::Range,
            range_points: 50,
            range_span: 0.05,
            round_decimals: Some(2),
            cache_artifacts: false,
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from defaults, an optional JSON file named by
    /// `GOLD_PREDICTOR_CONFIG`, and individual environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) => {
                info!("Loading configuration from {}", path);
                Self::load_from_file(Path::new(&path))?
            }
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from a JSON file; missing fields take defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BASE_DIR) {
            self.base_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_HOST) {
            self.host = v;
        }
        if let Some(v) = lookup(ENV_PORT) {
            self.port = parse_env(ENV_PORT, &v)?;
        }
        if let Some(v) = lookup(ENV_VALIDATE) {
            self.validate_input = parse_bool(ENV_VALIDATE, &v)?;
        }
        if let Some(v) = lookup(ENV_CHART_MODE) {
            self.chart_mode = v.parse()?;
        }
        if let Some(v) = lookup(ENV_CACHE) {
            self.cache_artifacts = parse_bool(ENV_CACHE, &v)?;
        }
        if let Some(v) = lookup(ENV_STATIC_DIR) {
            self.static_dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::NoModels);
        }
        if self.model_path(&self.default_model).is_none() {
            return Err(ConfigError::UnknownDefault(self.default_model.clone()));
        }
        if self.range_points == 0 {
            return Err(ConfigError::Invalid("range_points must be at least 1".into()));
        }
        if !self.range_span.is_finite() || self.range_span < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "range_span must be a non-negative number, got {}",
                self.range_span
            )));
        }
        Ok(())
    }

    /// Display names of the configured models, in order.
    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }

    /// Resolved artifact path for a model name.
    pub fn model_path(&self, name: &str) -> Option<PathBuf> {
        self.models
            .iter()
            .find(|m| m.name == name)
            .map(|m| self.resolve(&m.path))
    }

    pub fn scaler_file(&self) -> PathBuf {
        self.resolve(&self.scaler_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
