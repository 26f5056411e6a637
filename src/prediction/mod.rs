// src/prediction/mod.rs

pub mod cache;
pub mod handler;

use serde::{Deserialize, Serialize};

pub use cache::ArtifactCache;
pub use handler::{validate_exchange_rate, PredictionHandler};

/// One `(exchange rate, predicted gold rate)` pair of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Outcome of a prediction request. `message` is empty on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_value: f64,
    pub chart_series: Vec<ChartPoint>,
    pub message: String,
}

impl PredictionResult {
    pub fn success(predicted_value: f64, chart_series: Vec<ChartPoint>) -> Self {
        Self {
            predicted_value,
            chart_series,
            message: String::new(),
        }
    }

    /// A failed request: zero value, no chart.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            predicted_value: 0.0,
            chart_series: Vec::new(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.message.is_empty()
    }
}
