// src/models/mod.rs

pub mod regressor;
pub mod scaler;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PredictionError, Result};

// Re-export artifact components
pub use regressor::{Coefficients, Intercept, LinearModel, ModelKind, ModelOutput};
pub use scaler::Scaler;

/// A pre-fitted feature transform.
pub trait Transformer {
    /// Maps raw feature rows to the space the model was fitted in.
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;
}

/// A pre-fitted regression function.
pub trait Regressor {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<ModelOutput>;
}

/// Reads a JSON artifact from disk.
///
/// A missing file is reported as `ArtifactMissing`; every other I/O or parse
/// problem becomes a `PredictionFailure` carrying the underlying description.
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PredictionError::ArtifactMissing(path.to_path_buf()),
        _ => PredictionError::failure(format!("failed to read {}: {}", path.display(), e)),
    })?;

    debug!("Loaded artifact {} ({} bytes)", path.display(), data.len());

    serde_json::from_str(&data).map_err(|e| {
        PredictionError::failure(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Writes an artifact to disk in JSON format.
pub fn save_artifact<T: Serialize>(artifact: &T, path: &Path) -> Result<()> {
    let serialized = serde_json::to_string_pretty(artifact).map_err(|e| {
        PredictionError::failure(format!("failed to encode {}: {}", path.display(), e))
    })?;
    std::fs::write(path, serialized)
        .map_err(|e| PredictionError::failure(format!("failed to write {}: {}", path.display(), e)))
}
