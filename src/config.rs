// Service configuration, layered: defaults, then config.toml, then APP_* env vars

use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::filter::PaginationCursor;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    pub refresh_interval_secs: u64,
    pub initial_window: usize,
    pub window_increment: usize,

    // Local JSON inventory; when set the data store is not queried
    pub inventory_file: Option<String>,
    pub data_store_url: Option<String>,
    pub data_store_key: Option<String>,
    pub inventory_table: String,
    pub storage_bucket: String,

    pub site_url: String,
    pub resend_api_key: Option<String>,
    pub enquiry_from: String,
    pub enquiry_to: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("refresh_interval_secs", 30)?
            .set_default("initial_window", 6)?
            .set_default("window_increment", 6)?
            .set_default("inventory_table", "cars")?
            .set_default("storage_bucket", "car-images")?
            .set_default("site_url", "https://www.platinummotorz.co.uk")?
            .set_default("enquiry_from", "onboarding@resend.dev")?
            .set_default("enquiry_to", "enquiries@platinummotorz.co.uk")?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_RESEND_API_KEY).
            // Field names contain underscores, so no separator for nesting.
            .add_source(Environment::with_prefix("APP"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor::new(self.initial_window, self.window_increment)
    }

    pub fn site_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

// Same values as the builder defaults above
impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:3000".to_string(),
            refresh_interval_secs: 30,
            initial_window: 6,
            window_increment: 6,
            inventory_file: None,
            data_store_url: None,
            data_store_key: None,
            inventory_table: "cars".to_string(),
            storage_bucket: "car-images".to_string(),
            site_url: "https://www.platinummotorz.co.uk".to_string(),
            resend_api_key: None,
            enquiry_from: "onboarding@resend.dev".to_string(),
            enquiry_to: "enquiries@platinummotorz.co.uk".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let settings = Settings {
            refresh_interval_secs: 0,
            site_url: "https://example.test/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.refresh_interval(), Duration::from_secs(1));
        assert_eq!(settings.site_url(), "https://example.test");
        assert_eq!(settings.cursor().window_size(), 6);
    }
}
