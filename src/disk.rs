//! Yandex.Disk storage client: folder ensure and two-step upload.

use crate::error::BackupError;
use crate::types::DiskConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Response of `GET resources/upload`.
#[derive(Deserialize, Debug)]
struct UploadLink {
    #[serde(default)]
    href: Option<String>,
}

/// Client for the Yandex.Disk resources API.
pub struct DiskClient {
    /// Sends `Authorization: OAuth ...` on every request.
    api: reqwest::Client,
    /// Plain client for PUTs to upload hrefs, which carry their own credentials.
    transfer: reqwest::Client,
    config: DiskConfig,
}

impl DiskClient {
    pub fn new(config: DiskConfig) -> Result<Self, BackupError> {
        let mut auth = HeaderValue::from_str(&format!("OAuth {}", config.token))
            .map_err(|e| BackupError::InvalidInput(format!("Yandex.Disk token: {}", e)))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let api = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        let transfer = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            api,
            transfer,
            config,
        })
    }

    /// Makes sure `folder_name` exists, creating it if the probe says 404.
    ///
    /// Returns `true` if the folder existed or was created. Any other probe
    /// status, a failed creation, or a transport error is logged and gives
    /// `false`.
    pub async fn ensure_folder_exists(&self, folder_name: &str) -> bool {
        match self.try_ensure_folder(folder_name).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to ensure folder {}: {}", folder_name, e);
                false
            }
        }
    }

    async fn try_ensure_folder(&self, folder_name: &str) -> Result<(), BackupError> {
        let probe = self
            .api
            .get(&self.config.base_url)
            .query(&[("path", folder_name)])
            .send()
            .await?;

        match probe.status() {
            StatusCode::OK => {
                info!("Folder {} already exists", folder_name);
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                let created = self
                    .api
                    .put(&self.config.base_url)
                    .query(&[("path", folder_name)])
                    .send()
                    .await?;
                if created.status() != StatusCode::CREATED {
                    return Err(BackupError::from_response(created).await);
                }
                info!("Folder {} created", folder_name);
                Ok(())
            }
            _ => Err(BackupError::from_response(probe).await),
        }
    }

    /// Uploads `content` as `folder_name/file_name`, overwriting an existing file.
    ///
    /// Requests an upload link first, then PUTs the bytes to it. Returns
    /// `true` only when the storage answers 201 Created; every failure is
    /// logged and reported as `false`.
    pub async fn upload_file(&self, content: Vec<u8>, file_name: &str, folder_name: &str) -> bool {
        match self.try_upload(content, file_name, folder_name).await {
            Ok(()) => {
                info!("Uploaded {} to Yandex.Disk", file_name);
                true
            }
            Err(e) => {
                warn!("Failed to upload {}: {}", file_name, e);
                false
            }
        }
    }

    async fn try_upload(
        &self,
        content: Vec<u8>,
        file_name: &str,
        folder_name: &str,
    ) -> Result<(), BackupError> {
        let full_path = format!("{}/{}", folder_name, file_name);
        let href = self.upload_link(&full_path).await?;
        debug!("Uploading {} bytes to {}", content.len(), full_path);

        let response = self.transfer.put(&href).body(content).send().await?;
        if response.status() != StatusCode::CREATED {
            return Err(BackupError::from_response(response).await);
        }
        Ok(())
    }

    /// Asks for a one-off upload href for `full_path`.
    async fn upload_link(&self, full_path: &str) -> Result<String, BackupError> {
        let url = format!("{}upload", self.config.base_url);
        let response = self
            .api
            .get(&url)
            .query(&[("path", full_path), ("overwrite", "true")])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(BackupError::from_response(response).await);
        }

        let link: UploadLink = response.json().await?;
        link.href
            .filter(|href| !href.is_empty())
            .ok_or(BackupError::MissingUploadHref)
    }
}
