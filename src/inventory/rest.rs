// Fetches the inventory table from the data store's REST interface
// (PostgREST conventions: /rest/v1/<table>, apikey + bearer headers)

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::config::Settings;
use crate::models::Vehicle;

use super::{InventoryError, InventorySource};

pub struct RestInventorySource {
    http_client: Arc<Client>,
    url: String,
    api_key: Option<String>,
}

impl RestInventorySource {
    pub fn new(http_client: Arc<Client>, base_url: &str, table: &str, api_key: Option<String>) -> Self {
        Self {
            http_client,
            url: table_url(base_url, table),
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings, http_client: Arc<Client>) -> Result<Self, InventoryError> {
        let base_url = settings.data_store_url.as_deref().ok_or_else(|| {
            InventoryError::NotConfigured("set APP_DATA_STORE_URL or APP_INVENTORY_FILE".to_string())
        })?;
        Ok(Self::new(
            http_client,
            base_url,
            &settings.inventory_table,
            settings.data_store_key.clone(),
        ))
    }

    fn auth_headers(&self) -> Result<HeaderMap, InventoryError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = self.api_key.as_deref() {
            let invalid = |_| {
                InventoryError::NotConfigured("data store key is not a valid header value".to_string())
            };
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?;
            headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
            headers.insert(AUTHORIZATION, bearer);
        }
        Ok(headers)
    }
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}?select=*", base_url.trim_end_matches('/'), table)
}

impl InventorySource for RestInventorySource {
    fn name(&self) -> &str {
        "data store"
    }

    async fn fetch(&self) -> Result<Vec<Vehicle>, InventoryError> {
        tracing::debug!(url = %self.url, "Fetching inventory from data store");

        let response = self
            .http_client
            .get(&self.url)
            .headers(self.auth_headers()?)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        // Read as bytes first so a schema mismatch surfaces as a decode error
        let body = response.bytes().await?;
        let vehicles: Vec<Vehicle> = serde_json::from_slice(&body)?;
        tracing::debug!(count = vehicles.len(), "Fetched inventory");
        Ok(vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        assert_eq!(
            table_url("https://db.example.test/", "cars"),
            "https://db.example.test/rest/v1/cars?select=*"
        );
        assert_eq!(
            table_url("https://db.example.test", "stock"),
            "https://db.example.test/rest/v1/stock?select=*"
        );
    }

    #[test]
    fn test_auth_headers() {
        let client = Arc::new(Client::new());
        let source = RestInventorySource::new(
            client.clone(),
            "https://db.example.test",
            "cars",
            Some("anon-key".to_string()),
        );
        let headers = source.auth_headers().unwrap();
        assert_eq!(headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer anon-key");

        let anonymous = RestInventorySource::new(client, "https://db.example.test", "cars", None);
        assert!(anonymous.auth_headers().unwrap().is_empty());
    }
}
