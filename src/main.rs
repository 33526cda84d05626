mod config;
mod llm;
mod web;

use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;

use config::ProxyConfig;
use llm::{CompletionBackend, CompletionClient};
use web::routes;

// App state structure
struct AppState {
    config: ProxyConfig,
    backend: Arc<dyn CompletionBackend>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Nilenini chat proxy");

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let backend: Arc<dyn CompletionBackend> = match CompletionClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Forwarding chat requests to {}", config.api_url);

    let bind_addr = config.bind_addr.clone();
    let app_state = Data::new(AppState { config, backend });

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
