// Copies every listing image into the storage bucket and prints the
// resulting {car id: [image urls]} mapping as JSON on stdout.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use showroom::{
    config::Settings,
    image_mirror::ImageMirror,
    inventory::{ConfiguredSource, InventorySource},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "showroom=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::new()?;
    let http_client = Arc::new(Client::new());

    let source = ConfiguredSource::from_settings(&settings, http_client.clone())?;
    let vehicles = source.fetch().await.context("Failed to load inventory")?;
    let mirror = ImageMirror::from_settings(&settings, http_client)?;

    let mut mirrored = BTreeMap::new();
    for vehicle in &vehicles {
        if vehicle.images.is_empty() {
            continue;
        }
        tracing::info!(
            car_id = %vehicle.id,
            count = vehicle.images.len(),
            "Mirroring images for {}",
            vehicle.title()
        );
        let urls = mirror.mirror_images(&vehicle.images, &vehicle.id).await;
        mirrored.insert(vehicle.id.clone(), urls);
    }

    tracing::info!("Mirrored images for {} vehicles", mirrored.len());
    println!("{}", serde_json::to_string_pretty(&mirrored)?);
    Ok(())
}
