// Showroom stock service: inventory snapshot, filtering, enquiries

use std::sync::Arc;

use axum::extract::FromRef;
use reqwest::Client;

pub mod config;
pub mod email;
pub mod error;
pub mod filter;
pub mod image_mirror;
pub mod inventory;
pub mod models;
pub mod routes;

use crate::config::Settings;
use crate::email::Mailer;
use crate::inventory::InventoryStore;

// Shared by every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: Arc<Client>,
    pub inventory: Arc<InventoryStore>,
    // None when no mail provider key is configured
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, http_client: Arc<Client>, inventory: Arc<InventoryStore>) -> Self {
        let mailer = Mailer::from_settings(&settings, http_client.clone()).map(Arc::new);
        Self {
            settings,
            http_client,
            inventory,
            mailer,
        }
    }
}
