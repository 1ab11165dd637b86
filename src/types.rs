//! Data structures shared by the API clients and the orchestrator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default VK API endpoint.
pub const DEFAULT_VK_BASE_URL: &str = "https://api.vk.com/method";
/// VK API version sent with every request.
pub const DEFAULT_VK_VERSION: &str = "5.199";
/// Default Yandex.Disk resources endpoint (note the trailing slash).
pub const DEFAULT_DISK_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk/resources/";
/// Default per-request timeout for both APIs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A photo as returned by `photos.get` with `extended=1&photo_sizes=1`.
///
/// Fields VK omits fall back to zero/empty values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Photo {
    #[serde(default)]
    pub id: i64,
    /// Upload time, unix epoch seconds.
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub likes: Likes,
    #[serde(default)]
    pub sizes: Vec<PhotoSize>,
}

impl Photo {
    /// Number of likes, 0 when VK sent no `likes` object.
    pub fn likes_count(&self) -> u64 {
        self.likes.count
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Likes {
    #[serde(default)]
    pub count: u64,
}

/// One resolution of a photo.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PhotoSize {
    /// VK size label (`s`, `m`, `x`, `y`, `z`, `w`, ...).
    #[serde(rename = "type", default)]
    pub size_type: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub url: String,
}

impl PhotoSize {
    /// Pixel area, `width * height`.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Configuration for the VK photo source.
#[derive(Debug, Clone)]
pub struct VkConfig {
    /// VK access token
    pub token: String,
    /// Base URL of the method API, without trailing slash
    pub base_url: String,
    /// API version (`v` query parameter)
    pub version: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl Default for VkConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: DEFAULT_VK_BASE_URL.to_string(),
            version: DEFAULT_VK_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Configuration for the Yandex.Disk client.
#[derive(Debug, Clone)]
pub struct DiskConfig {
    /// OAuth token
    pub token: String,
    /// Resources endpoint; `upload` is appended to it for upload links
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: DEFAULT_DISK_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// What to back up and where to record it.
///
/// # Example
///
/// ```
/// use vk_backup::BackupRequest;
///
/// let request = BackupRequest::new("1");
/// assert_eq!(request.count, 5);
/// assert_eq!(request.folder_name(), "backup_1");
/// ```
#[derive(Debug, Clone)]
pub struct BackupRequest {
    /// VK user id or screen name
    pub user_id: String,
    /// Number of photos to request
    pub count: u32,
    /// Album to read from (`profile`, `wall`, `saved` or a numeric id)
    pub album_id: String,
    /// Destination folder is `{folder_prefix}{user_id}`
    pub folder_prefix: String,
    /// Where the JSON manifest is written
    pub manifest_path: PathBuf,
}

impl BackupRequest {
    /// Request for `user_id` with the defaults: 5 photos from the profile
    /// album into `backup_{user_id}`, manifest in `photo_info.json`.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            count: 5,
            album_id: "profile".to_string(),
            folder_prefix: "backup_".to_string(),
            manifest_path: PathBuf::from("photo_info.json"),
        }
    }

    /// Yandex.Disk folder the photos are uploaded to.
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.folder_prefix, self.user_id)
    }
}
