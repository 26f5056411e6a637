// src/prediction/handler.rs

use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use super::{ArtifactCache, PredictionResult};
use crate::config::{AppConfig, ChartMode};
use crate::error::{ConfigError, PredictionError, Result};
use crate::models::{LinearModel, Regressor, Scaler, Transformer};
use crate::utils::{chart_series, range_inputs};

/// Rejects exchange rates that are not strictly positive.
pub fn validate_exchange_rate(rate: f64) -> Result<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(PredictionError::InvalidInput(rate))
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Very large values overflow the scaled product; keep them as they are
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Turns an exchange rate into a predicted gold rate and trend chart data.
///
/// Artifacts are read from disk on every call unless `cache_artifacts` is set,
/// in which case they are reused until their files change.
pub struct PredictionHandler {
    config: AppConfig,
    scalers: Option<ArtifactCache<Scaler>>,
    models: Option<ArtifactCache<LinearModel>>,
}

impl PredictionHandler {
    /// Builds a handler, rejecting a configuration that fails `AppConfig::validate`.
    pub fn new(config: AppConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let (scalers, models) = if config.cache_artifacts {
            (Some(ArtifactCache::new()), Some(ArtifactCache::new()))
        } else {
            (None, None)
        };
        info!(
            "Prediction handler ready: {} model(s), validation {}, {:?} chart, cache {}",
            config.models.len(),
            if config.validate_input { "on" } else { "off" },
            config.chart_mode,
            if config.cache_artifacts { "on" } else { "off" },
        );
        Ok(Self {
            config,
            scalers,
            models,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Name of the model a request resolves to.
    pub fn model_name<'a>(&'a self, model_choice: Option<&'a str>) -> &'a str {
        model_choice.unwrap_or(self.config.default_model.as_str())
    }

    /// Serves one request. Every failure is reported through the result's
    /// message with a zero value and an empty chart.
    pub fn predict(&self, exchange_rate: f64, model_choice: Option<&str>) -> PredictionResult {
        match self.try_predict(exchange_rate, model_choice) {
            Ok(result) => result,
            Err(e) => {
                warn!("Prediction for rate {} failed: {:?}", exchange_rate, e);
                PredictionResult::failed(e.to_string())
            }
        }
    }

    /// Same as [`predict`](Self::predict) but keeps the error kind.
    pub fn try_predict(&self, exchange_rate: f64, model_choice: Option<&str>) -> Result<PredictionResult> {
        if self.config.validate_input {
            validate_exchange_rate(exchange_rate)?;
        }

        let model_name = self.model_name(model_choice);
        let model_path = self
            .config
            .model_path(model_name)
            .ok_or_else(|| PredictionError::UnknownModel(model_name.to_string()))?;

        let scaler = self.load_scaler(&self.config.scaler_file())?;
        let model = self.load_model(&model_path)?;

        // Row 0 is the requested rate, any further rows are the chart sweep
        let sweep = match self.config.chart_mode {
            ChartMode::Point => Vec::new(),
            ChartMode::Range => range_inputs(exchange_rate, self.config.range_span, self.config.range_points),
        };
        let inputs: Vec<f64> = std::iter::once(exchange_rate).chain(sweep.iter().copied()).collect();
        let rows: Vec<Vec<f64>> = inputs.iter().map(|x| vec![*x]).collect();

        let scaled = scaler.transform(&rows)?;
        let predictions = model.predict(&scaled)?.into_column(rows.len())?;

        if let Some(bad) = predictions.iter().find(|y| !y.is_finite()) {
            return Err(PredictionError::failure(format!(
                "model produced a non-finite prediction ({})",
                bad
            )));
        }

        let raw_value = predictions[0];
        let predicted_value = match self.config.round_decimals {
            Some(decimals) => round_to(raw_value, decimals),
            None => raw_value,
        };

        let series = match self.config.chart_mode {
            ChartMode::Point => chart_series(&[exchange_rate], &[raw_value]),
            ChartMode::Range => chart_series(&sweep, &predictions[1..]),
        };

        debug!(
            "Predicted {} for rate {} with '{}' ({} chart points)",
            predicted_value,
            exchange_rate,
            model_name,
            series.len()
        );

        Ok(PredictionResult::success(predicted_value, series))
    }

    fn load_scaler(&self, path: &Path) -> Result<Arc<Scaler>> {
        match &self.scalers {
            Some(cache) => cache.get_or_load(path, Scaler::load_from_file),
            None => Scaler::load_from_file(path).map(Arc::new),
        }
    }

    fn load_model(&self, path: &Path) -> Result<Arc<LinearModel>> {
        match &self.models {
            Some(cache) => cache.get_or_load(path, LinearModel::load_from_file),
            None => LinearModel::load_from_file(path).map(Arc::new),
        }
    }
}
