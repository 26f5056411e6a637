use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{load_artifact, Regressor};
use crate::error::{PredictionError, Result};

/// Family of linear regressor the artifact was fitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LinearRegression,
    Ridge,
    Lasso,
}

/// Fitted coefficients.
///
/// A model fitted on a `(n, 1)` target exports a `(n_targets, n_features)`
/// matrix and predicts a nested batch; a model fitted on a flat target exports
/// a vector and predicts a flat batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficients {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Intercept {
    Vector(Vec<f64>),
    Scalar(f64),
}

impl Default for Intercept {
    fn default() -> Self {
        Intercept::Scalar(0.0)
    }
}

impl Intercept {
    fn for_target(&self, target: usize) -> Result<f64> {
        match self {
            Intercept::Scalar(v) => Ok(*v),
            Intercept::Vector(v) if v.len() == 1 => Ok(v[0]),
            Intercept::Vector(v) => v.get(target).copied().ok_or_else(|| {
                PredictionError::failure(format!(
                    "intercept has {} entries, no entry for target {}",
                    v.len(),
                    target
                ))
            }),
        }
    }
}

/// Raw output of a model's predict call.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// One row per sample, one column per target.
    Nested(Vec<Vec<f64>>),
    /// One value per sample.
    Flat(Vec<f64>),
}

impl ModelOutput {
    /// Extracts one prediction per sample.
    ///
    /// Nested output is read from its first column; flat output is taken as is.
    pub fn into_column(self, expected: usize) -> Result<Vec<f64>> {
        let column = match self {
            ModelOutput::Nested(rows) => rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.first().copied().ok_or_else(|| {
                        PredictionError::failure(format!("model returned an empty prediction row at index {}", i))
                    })
                })
                .collect::<Result<Vec<f64>>>()?,
            ModelOutput::Flat(values) => values,
        };

        if column.len() != expected {
            return Err(PredictionError::failure(format!(
                "model returned {} predictions for {} samples",
                column.len(),
                expected
            )));
        }
        Ok(column)
    }
}

/// A fitted linear model: `y = X · coefficientsᵀ + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub kind: ModelKind,
    pub coefficients: Coefficients,
    #[serde(default)]
    pub intercept: Intercept,
    /// Regularization strength used in training, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl LinearModel {
    /// Loads the model state from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        load_artifact(path)
    }
}

fn dot(weights: &[f64], row: &[f64]) -> Result<f64> {
    if weights.len() != row.len() {
        return Err(PredictionError::failure(format!(
            "X has {} features, but the model is expecting {} features as input",
            row.len(),
            weights.len()
        )));
    }
    Ok(weights.iter().zip(row).map(|(w, x)| w * x).sum())
}

impl Regressor for LinearModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<ModelOutput> {
        debug!("Predicting {} samples with {:?}", rows.len(), self.kind);

        match &self.coefficients {
            Coefficients::Matrix(targets) => {
                if targets.is_empty() {
                    return Err(PredictionError::failure("model has no fitted targets"));
                }
                let nested = rows
                    .iter()
                    .map(|row| {
                        targets
                            .iter()
                            .enumerate()
                            .map(|(t, weights)| -> Result<f64> {
                                Ok(dot(weights, row)? + self.intercept.for_target(t)?)
                            })
                            .collect::<Result<Vec<f64>>>()
                    })
                    .collect::<Result<Vec<Vec<f64>>>>()?;
                Ok(ModelOutput::Nested(nested))
            }
            Coefficients::Vector(weights) => {
                let intercept = self.intercept.for_target(0)?;
                let flat = rows
                    .iter()
                    .map(|row| -> Result<f64> { Ok(dot(weights, row)? + intercept) })
                    .collect::<Result<Vec<f64>>>()?;
                Ok(ModelOutput::Flat(flat))
            }
        }
    }
}
