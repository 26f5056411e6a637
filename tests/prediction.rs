mod common;

use std::time::{Duration, SystemTime};

use common::{fixture, linear, write};
use gold_rate_predictor::{ChartMode, PredictionError, PredictionHandler};

const LINEAR: &str = "Linear Regression";
const RIDGE: &str = "Ridge Regression";

#[test]
fn valid_request_predicts_and_charts() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some(LINEAR));
    assert_eq!(result.message, "");
    assert_eq!(result.predicted_value, 62625.0);
    assert!(!result.chart_series.is_empty());
}

#[test]
fn flat_model_output_is_unwrapped() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some(RIDGE));
    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.predicted_value, 62547.5);
}

#[test]
fn missing_choice_uses_the_default_model() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();
    assert_eq!(handler.predict(83.5, None), handler.predict(83.5, Some(LINEAR)));
}

#[test]
fn point_mode_charts_one_point() {
    let mut fx = fixture();
    fx.config.chart_mode = ChartMode::Point;
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some(LINEAR));
    assert_eq!(result.chart_series.len(), 1);
    assert_eq!(result.chart_series[0].x, 83.5);
    assert_eq!(result.chart_series[0].y, 62625.0);
}

#[test]
fn range_mode_charts_fifty_points_around_the_rate() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let series = handler.predict(83.5, Some(LINEAR)).chart_series;
    assert_eq!(series.len(), 50);
    assert!((series[0].x - 83.5 * 0.95).abs() < 1e-9);
    assert!((series[49].x - 83.5 * 1.05).abs() < 1e-9);
    // linear model: the trend rises with the rate
    assert!(series.windows(2).all(|w| w[1].y > w[0].y));
}

#[test]
fn non_positive_rate_is_rejected_without_loading_artifacts() {
    let mut fx = fixture();
    fx.config.base_dir = fx.dir.path().join("does-not-exist");
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    for rate in [0.0, -83.5] {
        let result = handler.predict(rate, Some(LINEAR));
        assert_eq!(result.predicted_value, 0.0);
        assert!(result.chart_series.is_empty());
        assert_eq!(result.message, "Error: Exchange rate must be greater than 0.");
    }
}

#[test]
fn validation_can_be_switched_off() {
    let mut fx = fixture();
    fx.config.validate_input = false;
    fx.config.chart_mode = ChartMode::Point;
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(-4.0, Some(LINEAR));
    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.predicted_value, 0.0 + 60000.0 - 3000.0 * 21.0);
}

#[test]
fn unknown_model_is_reported() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some("Random Forest"));
    assert_eq!(result.predicted_value, 0.0);
    assert!(result.chart_series.is_empty());
    assert_eq!(result.message, "Error: Selected model 'Random Forest' is not available.");
}

#[test]
fn missing_artifacts_are_reported_for_any_rate() {
    let fx = fixture();
    std::fs::remove_file(fx.dir.path().join("scaler.json")).unwrap();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    for rate in [83.5, 1e-6, 1e9] {
        let result = handler.predict(rate, Some(LINEAR));
        assert_eq!(result.predicted_value, 0.0);
        assert!(result.chart_series.is_empty());
        assert!(result.message.contains("Model files not found"), "{}", result.message);
    }

    let fx = fixture();
    std::fs::remove_file(fx.dir.path().join("ridge_regression.json")).unwrap();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();
    assert!(matches!(
        handler.try_predict(83.5, Some(RIDGE)),
        Err(PredictionError::ArtifactMissing(_))
    ));
    assert!(handler.predict(83.5, Some(LINEAR)).is_success());
}

#[test]
fn corrupt_artifact_is_a_generic_failure() {
    let fx = fixture();
    std::fs::write(fx.dir.path().join("linear_regression.json"), "{\"kind\": \"linear_regression\"").unwrap();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some(LINEAR));
    assert_eq!(result.predicted_value, 0.0);
    assert!(result.chart_series.is_empty());
    assert!(result.message.starts_with("An error occurred:"), "{}", result.message);
}

#[test]
fn shape_mismatch_is_a_generic_failure() {
    let fx = fixture();
    write(
        &gold_rate_predictor::models::Scaler::Standard {
            mean: vec![80.0, 1.0],
            scale: vec![4.0, 1.0],
        },
        &fx.dir.path().join("scaler.json"),
    );
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    let result = handler.predict(83.5, Some(LINEAR));
    assert!(result.message.starts_with("An error occurred:"));
    assert!(result.message.contains("expecting 2 features"));
}

#[test]
fn identical_requests_give_identical_results() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();
    assert_eq!(handler.predict(83.5, Some(RIDGE)), handler.predict(83.5, Some(RIDGE)));
}

#[test]
fn extreme_rates_never_panic() {
    let fx = fixture();
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    for rate in [1e9, 1e-6, 1e300] {
        let result = handler.predict(rate, Some(LINEAR));
        if result.is_success() {
            assert!(result.predicted_value.is_finite());
            assert_eq!(result.chart_series.len(), 50);
        } else {
            assert_eq!(result.predicted_value, 0.0);
            assert!(result.chart_series.is_empty());
        }
    }
}

#[test]
fn rounding_is_configurable() {
    let mut fx = fixture();
    fx.config.round_decimals = Some(0);
    let rounded = PredictionHandler::new(fx.config.clone()).unwrap().predict(83.3333, Some(LINEAR));
    assert_eq!(rounded.predicted_value, 62500.0);

    fx.config.round_decimals = None;
    let raw = PredictionHandler::new(fx.config.clone()).unwrap().predict(83.3333, Some(LINEAR));
    assert!((raw.predicted_value - 62499.975).abs() < 1e-6);
}

#[test]
fn cached_artifacts_follow_file_changes() {
    let mut fx = fixture();
    fx.config.cache_artifacts = true;
    fx.config.chart_mode = ChartMode::Point;
    let handler = PredictionHandler::new(fx.config.clone()).unwrap();

    assert_eq!(handler.predict(80.0, Some(LINEAR)).predicted_value, 60000.0);
    assert_eq!(handler.predict(80.0, Some(LINEAR)).predicted_value, 60000.0);

    let path = fx.dir.path().join("linear_regression.json");
    write(&linear(61000.0), &path);
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(5))
        .unwrap();

    assert_eq!(handler.predict(80.0, Some(LINEAR)).predicted_value, 61000.0);
}
