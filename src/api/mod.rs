// src/api/mod.rs

use actix_web::web;
use std::sync::Arc;

use crate::prediction::PredictionHandler;

/// Application state shared by every worker
pub struct AppState {
    pub handler: Arc<PredictionHandler>,
}

/// Re-export handlers
pub mod handlers;

pub use handlers::{chart_svg, get_models, predict, respond, ModelsResponse, PredictRequest, PredictResponse};

/// Registers the JSON API and the websocket route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/models", web::get().to(get_models))
            .route("/predict", web::post().to(predict))
            .route("/chart.svg", web::get().to(chart_svg)),
    )
    .route("/ws", web::get().to(crate::ws::prediction_ws));
}
