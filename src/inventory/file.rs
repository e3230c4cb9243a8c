// Reads the inventory from a local JSON file (an array of store rows)

use std::path::PathBuf;

use crate::models::Vehicle;

use super::{InventoryError, InventorySource};

pub struct FileInventorySource {
    path: PathBuf,
}

impl FileInventorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for FileInventorySource {
    fn name(&self) -> &str {
        "inventory file"
    }

    async fn fetch(&self) -> Result<Vec<Vehicle>, InventoryError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|source| InventoryError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_demo_inventory() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/inventory.json");
        let vehicles = FileInventorySource::new(path).fetch().await.unwrap();
        assert!(!vehicles.is_empty());
        assert!(vehicles.iter().all(|v| !v.id.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = FileInventorySource::new("/nonexistent/inventory.json").fetch().await;
        assert!(matches!(result, Err(InventoryError::Io { .. })));
    }
}
