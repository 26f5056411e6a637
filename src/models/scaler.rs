// src/models/scaler.rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{load_artifact, Transformer};
use crate::error::{PredictionError, Result};

/// A fitted feature scaler as exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// Standardization: `(x - mean) / scale`.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// Min-max scaling into `feature_range`.
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl Scaler {
    /// Loads a scaler from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        load_artifact(path)
    }

    /// Number of input features the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { data_min, .. } => data_min.len(),
        }
    }

    fn check_parameters(&self) -> Result<()> {
        let (a, b) = match self {
            Scaler::Standard { mean, scale } => (mean.len(), scale.len()),
            Scaler::MinMax { data_min, data_max, .. } => (data_min.len(), data_max.len()),
        };
        if a == 0 || a != b {
            return Err(PredictionError::failure(format!(
                "scaler parameters are inconsistent ({} vs {} features)",
                a, b
            )));
        }
        Ok(())
    }

    fn transform_value(&self, j: usize, x: f64) -> f64 {
        match self {
            Scaler::Standard { mean, scale } => (x - mean[j]) / non_zero(scale[j]),
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                let scale = (hi - lo) / non_zero(data_max[j] - data_min[j]);
                x * scale + (lo - data_min[j] * scale)
            }
        }
    }
}

/// Constant features are left unscaled.
fn non_zero(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

impl Transformer for Scaler {
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.check_parameters()?;
        let n_features = self.n_features();

        rows.iter()
            .map(|row| {
                if row.len() != n_features {
                    return Err(PredictionError::failure(format!(
                        "X has {} features, but the scaler is expecting {} features as input",
                        row.len(),
                        n_features
                    )));
                }
                Ok(row
                    .iter()
                    .enumerate()
                    .map(|(j, x)| self.transform_value(j, *x))
                    .collect())
            })
            .collect()
    }
}
