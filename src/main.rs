use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use showroom::{
    AppState,
    config::Settings,
    inventory::{ConfiguredSource, InventorySource, InventoryStore, spawn_refresh},
    routes,
};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "showroom=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing showroom server...");

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    let http_client = Arc::new(
        Client::builder()
            .user_agent(concat!("showroom/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build shared reqwest client")?,
    );

    let inventory = Arc::new(InventoryStore::new());
    let source = ConfiguredSource::from_settings(&shared_settings, http_client.clone())
        .context("No inventory source available")?;
    tracing::info!("Using {} as inventory source.", source.name());
    // Held until shutdown; dropping it stops the refresh task
    let refresh = spawn_refresh(source, inventory.clone(), shared_settings.refresh_interval());

    let app_state = AppState::new(shared_settings.clone(), http_client, inventory);
    if app_state.mailer.is_none() {
        tracing::warn!("APP_RESEND_API_KEY not set, enquiries will be rejected.");
    }

    let app = routes::create_router(app_state);

    let addr: SocketAddr = shared_settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", shared_settings.server_address))?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh.stop();
    Ok(())
}
