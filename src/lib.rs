//! Gold rate prediction from the USD/INR exchange rate.
//!
//! A [`PredictionHandler`] loads a fitted scaler and a fitted linear model
//! from JSON artifacts, predicts the gold rate and builds trend chart data.
//! The `server` module exposes it over HTTP and websocket.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod prediction;
pub mod server;
pub mod utils;
pub mod ws;

pub use config::{AppConfig, ChartMode, ModelEntry};
pub use error::{ChartError, ConfigError, PredictionError};
pub use prediction::{ChartPoint, PredictionHandler, PredictionResult};
