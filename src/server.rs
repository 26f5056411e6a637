use actix_cors::Cors;
use actix_files as fs;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::prediction::PredictionHandler;

// Running the Actix web server
pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind = (config.host.clone(), config.port);
    let static_dir = config.static_dir.clone();

    let handler = PredictionHandler::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let app_state = web::Data::new(AppState {
        handler: Arc::new(handler),
    });

    info!("Serving on http://{}:{} (frontend from {})", bind.0, bind.1, static_dir.display());

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(api::configure)
            .service(fs::Files::new("/", static_dir.clone()).index_file("index.html")) // Serve frontend
    })
    .bind(bind)?
    .run()
    .await
}
