// src/api/handlers.rs

use actix_web::error::ErrorInternalServerError;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;

use crate::api::AppState;
use crate::prediction::{ChartPoint, PredictionHandler, PredictionResult};
use crate::utils::{chart_title, render_svg};

/// Body of `POST /api/predict`, query of `GET /api/chart.svg`, and a websocket frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub usd_inr: f64,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// The exchange rate the prediction was made for, echoed back.
    pub usd_inr: f64,
    pub predicted_gold_rate: f64,
    pub chart: Vec<ChartPoint>,
    pub message: String,
    pub model: String,
    pub title: String,
}

impl PredictResponse {
    fn from_result(usd_inr: f64, result: PredictionResult, model: &str) -> Self {
        PredictResponse {
            usd_inr,
            predicted_gold_rate: result.predicted_value,
            chart: result.chart_series,
            message: result.message,
            model: model.to_string(),
            title: chart_title(model),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub default: String,
}

/// Runs one request through the handler.
pub fn respond(handler: &PredictionHandler, request: &PredictRequest) -> PredictResponse {
    let model = handler.model_name(request.model.as_deref());
    let result = handler.predict(request.usd_inr, request.model.as_deref());
    PredictResponse::from_result(request.usd_inr, result, model)
}

/// Runs the handler off the reactor; artifact loading is blocking file I/O.
async fn respond_blocking(handler: Arc<PredictionHandler>, request: PredictRequest) -> Result<PredictResponse, actix_web::Error> {
    task::spawn_blocking(move || respond(&handler, &request))
        .await
        .map_err(|e| {
            error!("Prediction task failed: {}", e);
            ErrorInternalServerError(e)
        })
}

pub async fn get_models(data: web::Data<AppState>) -> impl Responder {
    let config = data.handler.config();
    HttpResponse::Ok().json(ModelsResponse {
        models: config.model_names(),
        default: config.default_model.clone(),
    })
}

/// Failures are reported in the body's `message`, never as an HTTP error.
pub async fn predict(
    data: web::Data<AppState>,
    body: web::Json<PredictRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let response = respond_blocking(Arc::clone(&data.handler), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn chart_svg(
    data: web::Data<AppState>,
    query: web::Query<PredictRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let response = respond_blocking(Arc::clone(&data.handler), query.into_inner()).await?;

    if !response.message.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().body(response.message));
    }

    match render_svg(&response.chart, &response.title) {
        Ok(svg) => Ok(HttpResponse::Ok().content_type("image/svg+xml").body(svg)),
        Err(e) => {
            error!("Chart rendering failed: {}", e);
            Ok(HttpResponse::InternalServerError().body(e.to_string()))
        }
    }
}
