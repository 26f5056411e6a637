#![allow(dead_code)]

use std::path::Path;

use gold_rate_predictor::models::{save_artifact, Coefficients, Intercept, LinearModel, ModelKind, Scaler};
use gold_rate_predictor::AppConfig;
use tempfile::TempDir;

/// Artifacts written to a temporary directory plus a config pointing at them.
///
/// Scaler: (x - 80) / 4. Linear: 3000 * z + 60000 (nested output).
/// Ridge: 2900 * z + 60010 (flat output).
pub struct Fixture {
    pub dir: TempDir,
    pub config: AppConfig,
}

pub fn scaler() -> Scaler {
    Scaler::Standard {
        mean: vec![80.0],
        scale: vec![4.0],
    }
}

pub fn linear(intercept: f64) -> LinearModel {
    LinearModel {
        kind: ModelKind::LinearRegression,
        coefficients: Coefficients::Matrix(vec![vec![3000.0]]),
        intercept: Intercept::Vector(vec![intercept]),
        alpha: None,
    }
}

pub fn ridge() -> LinearModel {
    LinearModel {
        kind: ModelKind::Ridge,
        coefficients: Coefficients::Vector(vec![2900.0]),
        intercept: Intercept::Scalar(60010.0),
        alpha: Some(1.0),
    }
}

pub fn write<T: serde::Serialize>(artifact: &T, path: &Path) {
    save_artifact(artifact, path).expect("write artifact");
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    write(&scaler(), &dir.path().join("scaler.json"));
    write(&linear(60000.0), &dir.path().join("linear_regression.json"));
    write(&ridge(), &dir.path().join("ridge_regression.json"));

    let config = AppConfig {
        base_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    Fixture { dir, config }
}
