//! VK photo source: listing a user's photos and downloading their bytes.

use crate::error::BackupError;
use crate::types::{Photo, VkConfig};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Envelope of a VK method response.
///
/// VK reports API-level failures (bad token, private profile) as HTTP 200
/// with an `error` object instead of `response`.
#[derive(Deserialize, Debug, Default)]
struct VkEnvelope {
    #[serde(default)]
    response: Option<PhotoList>,
    #[serde(default)]
    error: Option<VkApiError>,
}

#[derive(Deserialize, Debug, Default)]
struct PhotoList {
    #[serde(default)]
    items: Vec<Photo>,
}

#[derive(Deserialize, Debug)]
struct VkApiError {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Client for the VK `photos.*` methods.
pub struct PhotoSource {
    client: reqwest::Client,
    config: VkConfig,
}

impl PhotoSource {
    pub fn new(config: VkConfig) -> Result<Self, BackupError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Fetches up to `count` photos of `user_id` from `album_id`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner id (numeric ids are passed through as strings)
    /// * `count` - Number of photos to request
    /// * `album_id` - `profile`, `wall`, `saved` or a numeric album id
    ///
    /// # Returns
    ///
    /// The photos in API order. A non-success status or a VK error object is
    /// logged and yields an empty list; only transport and decoding failures
    /// are returned as errors.
    pub async fn get_photos(
        &self,
        user_id: &str,
        count: u32,
        album_id: &str,
    ) -> Result<Vec<Photo>, BackupError> {
        let url = format!("{}/photos.get", self.config.base_url);
        info!("Requesting {} photos of user {} from album '{}'", count, user_id, album_id);

        let count = count.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("owner_id", user_id),
                ("count", count.as_str()),
                ("album_id", album_id),
                ("extended", "1"),
                ("photo_sizes", "1"),
                ("access_token", self.config.token.as_str()),
                ("v", self.config.version.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = BackupError::from_response(response).await;
            warn!("Failed to fetch photos: {}", err);
            return Ok(Vec::new());
        }

        let envelope: VkEnvelope = response.json().await?;
        if let Some(api_error) = envelope.error {
            warn!(
                "VK API error {}: {}",
                api_error.error_code, api_error.error_msg
            );
            return Ok(Vec::new());
        }

        let photos = envelope.response.unwrap_or_default().items;
        info!("Received {} photos", photos.len());
        Ok(photos)
    }

    /// Downloads the photo at `url` into memory.
    pub async fn download_photo(&self, url: &str) -> Result<Vec<u8>, BackupError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BackupError::from_response(response).await);
        }

        let mut content = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut byte_stream = response.bytes_stream();
        while let Some(piece) = byte_stream.next().await {
            content.extend_from_slice(&piece?);
        }
        debug!("Downloaded {} bytes from {}", content.len(), url);
        Ok(content)
    }
}
