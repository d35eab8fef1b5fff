/// NASA explorer backend: proxies APOD, EPIC and Mars Rover APIs
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod utils;

use crate::clients::{NasaClient, UpstreamApi};
use crate::config::{AppConfig, Credential};
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::{ApodService, EpicService, MarsService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    match config.credential {
        Credential::Configured(_) => info!("Using configured NASA API key"),
        Credential::Demo => warn!("NASA_API_KEY not set, falling back to the rate-limited DEMO_KEY"),
        Credential::Missing => {
            error!("NASA_API_KEY is not set; every NASA endpoint will answer with a configuration error")
        }
    }

    // Initialize clients
    let nasa_client: Arc<dyn UpstreamApi> = Arc::new(NasaClient::new(
        config.nasa_api_url.clone(),
        config.credential.clone(),
        Duration::from_secs(config.upstream_timeout_seconds),
    )?);

    // Initialize application state
    let state = AppState {
        apod_service: Arc::new(ApodService::new(nasa_client.clone())),
        epic_service: Arc::new(EpicService::new(nasa_client.clone())),
        mars_service: Arc::new(MarsService::new(nasa_client)),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("nasa_explorer listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
