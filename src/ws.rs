use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, error};
use std::sync::Arc;
use tokio::task;

use crate::api::{respond, AppState, PredictRequest, PredictResponse};
use crate::prediction::PredictionHandler;

/// Websocket session answering one prediction per text frame.
pub struct PredictionSocket {
    handler: Arc<PredictionHandler>,
}

impl PredictionSocket {
    pub fn new(handler: Arc<PredictionHandler>) -> Self {
        Self { handler }
    }
}

impl Actor for PredictionSocket {
    type Context = ws::WebsocketContext<Self>;
}

/// Builds the JSON reply for one incoming frame.
pub fn reply(handler: &PredictionHandler, text: &str) -> String {
    let response = match serde_json::from_str::<PredictRequest>(text) {
        Ok(request) => respond(handler, &request),
        Err(e) => PredictResponse {
            usd_inr: 0.0,
            predicted_gold_rate: 0.0,
            chart: Vec::new(),
            message: format!("invalid request: {}", e),
            model: String::new(),
            title: String::new(),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        error!("Failed to encode websocket reply: {}", e);
        String::from("{}")
    })
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PredictionSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => {
                debug!("Websocket request: {}", text);
                let handler = Arc::clone(&self.handler);
                let text = text.to_string();
                let job = async move { task::spawn_blocking(move || reply(&handler, &text)).await };
                // Frames are answered in arrival order; later frames queue behind this one
                ctx.wait(job.into_actor(self).map(|res, _act, ctx| match res {
                    Ok(json) => ctx.text(json),
                    Err(e) => error!("Websocket prediction task failed: {}", e),
                }));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                error!("Websocket protocol error: {}", e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

// The WebSocket route handler
pub async fn prediction_ws(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(PredictionSocket::new(Arc::clone(&data.handler)), &req, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn malformed_frame_gets_an_error_reply() {
        let handler = PredictionHandler::new(AppConfig::default()).unwrap();
        let json = reply(&handler, "83.5");
        let response: PredictResponse = serde_json::from_str(&json).unwrap();
        assert!(response.message.starts_with("invalid request"));
        assert!(response.chart.is_empty());
    }

    #[test]
    fn unknown_model_frame_names_the_model() {
        let handler = PredictionHandler::new(AppConfig::default()).unwrap();
        let json = reply(&handler, r#"{"usd_inr": 83.5, "model": "XGBoost"}"#);
        let response: PredictResponse = serde_json::from_str(&json).unwrap();
        assert!(response.message.contains("'XGBoost'"));
        assert_eq!(response.model, "XGBoost");
        assert_eq!(response.usd_inr, 83.5);
    }
}
