// Copies third-party listing images into our own storage bucket

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use tokio::time::sleep;

use crate::config::Settings;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DELAY_BETWEEN_UPLOADS_MS: u64 = 500; // Stay under the listing site's rate limits
const KNOWN_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

// Extension from the URL path (query and fragment ignored), defaulting to jpg
pub fn image_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| "jpg".to_string())
}

pub fn content_type(extension: &str) -> String {
    if extension == "jpg" {
        "image/jpeg".to_string()
    } else {
        format!("image/{}", extension)
    }
}

pub fn object_key(car_id: &str, index: usize, extension: &str) -> String {
    format!("{}/{}.{}", car_id, index, extension)
}

pub struct ImageMirror {
    http_client: Arc<Client>,
    storage_url: String,
    bucket: String,
    api_key: Option<String>,
    delay: Duration,
}

impl ImageMirror {
    pub fn new(http_client: Arc<Client>, storage_url: &str, bucket: &str, api_key: Option<String>) -> Self {
        Self {
            http_client,
            storage_url: storage_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key,
            delay: Duration::from_millis(DELAY_BETWEEN_UPLOADS_MS),
        }
    }

    pub fn from_settings(settings: &Settings, http_client: Arc<Client>) -> Result<Self> {
        let storage_url = settings
            .data_store_url
            .as_deref()
            .ok_or_else(|| anyhow!("APP_DATA_STORE_URL must be set to mirror images"))?;
        Ok(Self::new(http_client, storage_url, &settings.storage_bucket, settings.data_store_key.clone()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.storage_url, self.bucket, key)
    }

    fn upload_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.storage_url, self.bucket, key)
    }

    async fn try_mirror(&self, image_url: &str, car_id: &str, index: usize) -> Result<String> {
        let response = self
            .http_client
            .get(image_url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()
            .context("Failed to fetch image")?;
        let bytes = response.bytes().await.context("Failed to read image body")?;

        let extension = image_extension(image_url);
        let key = object_key(car_id, index, &extension);

        let mut request = self
            .http_client
            .post(self.upload_url(&key))
            .header(reqwest::header::CONTENT_TYPE, content_type(&extension))
            .header("x-upsert", "true")
            .body(bytes);
        if let Some(api_key) = self.api_key.as_deref() {
            request = request.bearer_auth(api_key).header("apikey", api_key);
        }
        request
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("Storage rejected upload of {}", key))?;

        Ok(self.public_url(&key))
    }

    /// Mirror one image. On any failure the original URL comes back so the
    /// listing still has something to show.
    pub async fn mirror_image(&self, image_url: &str, car_id: &str, index: usize) -> String {
        match self.try_mirror(image_url, car_id, index).await {
            Ok(public_url) => {
                tracing::debug!(car_id, index, %public_url, "Mirrored image");
                public_url
            }
            Err(e) => {
                tracing::warn!(
                    car_id,
                    index,
                    image_url,
                    error = %e,
                    "Image mirroring failed, keeping source URL"
                );
                image_url.to_string()
            }
        }
    }

    /// Mirror a listing's images one by one, preserving their order.
    pub async fn mirror_images(&self, images: &[String], car_id: &str) -> Vec<String> {
        let mut mirrored = Vec::with_capacity(images.len());
        for (index, image_url) in images.iter().enumerate() {
            if index > 0 {
                sleep(self.delay).await;
            }
            mirrored.push(self.mirror_image(image_url, car_id, index).await);
        }
        mirrored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(image_extension("https://cdn.test/a/b/photo.JPEG"), "jpeg");
        assert_eq!(image_extension("https://cdn.test/photo.webp?w=800"), "webp");
        assert_eq!(image_extension("https://cdn.test/photo.png#top"), "png");
        assert_eq!(image_extension("https://cdn.test/photo.gif"), "jpg");
        assert_eq!(image_extension("https://cdn.test/photo"), "jpg");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type("jpg"), "image/jpeg");
        assert_eq!(content_type("jpeg"), "image/jpeg");
        assert_eq!(content_type("webp"), "image/webp");
    }

    #[test]
    fn test_storage_urls() {
        let mirror = ImageMirror::new(Arc::new(Client::new()), "https://store.test/", "car-images", None);
        let key = object_key("car-7", 2, "png");
        assert_eq!(key, "car-7/2.png");
        assert_eq!(mirror.upload_url(&key), "https://store.test/storage/v1/object/car-images/car-7/2.png");
        assert_eq!(
            mirror.public_url(&key),
            "https://store.test/storage/v1/object/public/car-images/car-7/2.png"
        );
    }

    #[tokio::test]
    async fn test_unreachable_source_falls_back_to_original() {
        let mirror = ImageMirror::new(Arc::new(Client::new()), "http://127.0.0.1:9", "car-images", None)
            .with_delay(Duration::ZERO);
        let images = vec![
            "http://127.0.0.1:9/one.jpg".to_string(),
            "not a url".to_string(),
        ];
        assert_eq!(mirror.mirror_images(&images, "car-1").await, images);
    }
}
