// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for the prediction pipeline.
pub type Result<T> = std::result::Result<T, PredictionError>;

/// Everything that can go wrong while serving a single prediction request.
///
/// None of these escape `PredictionHandler::predict`; they are folded into the
/// `message` field of the returned result.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The exchange rate failed the positivity check.
    #[error("Error: Exchange rate must be greater than 0.")]
    InvalidInput(f64),

    /// The requested model is not part of the configured mapping.
    #[error("Error: Selected model '{0}' is not available.")]
    UnknownModel(String),

    /// A scaler or model file does not exist.
    #[error("Error: Model files not found. Please ensure all model files are present.")]
    ArtifactMissing(PathBuf),

    /// Anything else raised while loading, transforming or predicting.
    #[error("An error occurred: {0}")]
    PredictionFailure(String),
}

impl PredictionError {
    /// Create a generic prediction failure.
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::PredictionFailure(msg.into())
    }
}

/// Errors raised while assembling the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },

    #[error("no models configured")]
    NoModels,

    #[error("default model '{0}' is not in the model mapping")]
    UnknownDefault(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Chart rendering failures.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to plot: chart series is empty")]
    EmptySeries,

    #[error("failed to draw chart: {0}")]
    Drawing(String),
}
