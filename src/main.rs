// src/main.rs

use log::{error, info};

use gold_rate_predictor::config::AppConfig;
use gold_rate_predictor::server::run_server;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    // Initialize environment variables
    dotenv::dotenv().ok();

    // Initialize the logger
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!(
        "Artifacts: scaler {}, models {:?}",
        config.scaler_file().display(),
        config.model_names()
    );

    run_server(config).await
}
