//! Where the stock comes from and where the current snapshot lives.

use std::future::Future;
use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::models::{Snapshot, Vehicle};

pub mod file;
pub mod refresh;
pub mod rest;

pub use file::FileInventorySource;
pub use refresh::{RefreshHandle, refresh_once, spawn_refresh};
pub use rest::RestInventorySource;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Data store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read inventory file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Inventory payload is not a list of vehicles: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Inventory source not configured: {0}")]
    NotConfigured(String),

    #[error("Inventory source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can produce a full inventory listing.
pub trait InventorySource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self) -> impl Future<Output = Result<Vec<Vehicle>, InventoryError>> + Send;
}

/// The source chosen by configuration.
pub enum ConfiguredSource {
    Rest(RestInventorySource),
    File(FileInventorySource),
}

impl ConfiguredSource {
    /// A local inventory file wins over the data store, so the service can
    /// run without credentials.
    pub fn from_settings(settings: &Settings, http_client: Arc<Client>) -> Result<Self, InventoryError> {
        if let Some(path) = settings.inventory_file.as_deref() {
            return Ok(ConfiguredSource::File(FileInventorySource::new(path)));
        }
        Ok(ConfiguredSource::Rest(RestInventorySource::from_settings(settings, http_client)?))
    }
}

impl InventorySource for ConfiguredSource {
    fn name(&self) -> &str {
        match self {
            ConfiguredSource::Rest(source) => source.name(),
            ConfiguredSource::File(source) => source.name(),
        }
    }

    async fn fetch(&self) -> Result<Vec<Vehicle>, InventoryError> {
        match self {
            ConfiguredSource::Rest(source) => source.fetch().await,
            ConfiguredSource::File(source) => source.fetch().await,
        }
    }
}

/// Holds the current snapshot. Readers get a cheap `Arc` clone and keep
/// working against it even if a refresh swaps in a newer one meanwhile.
#[derive(Debug, Default)]
pub struct InventoryStore {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(Snapshot::new(vehicles)))),
        }
    }

    /// `None` until the first successful fetch.
    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, vehicles: Vec<Vehicle>) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::new(vehicles));
        *self.current.write().await = Some(snapshot.clone());
        snapshot
    }
}
