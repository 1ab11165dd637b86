//! vk-backup - back up a VK user's most popular photos to Yandex.Disk
//!
//! The library fetches a user's photos through the VK API, ranks them by
//! likes and resolution, uploads the largest variant of each one to a
//! per-user Yandex.Disk folder and writes a JSON manifest of what was stored.
//!
//! # Features
//!
//! - **Ranking**: most liked first, larger pictures first among equals
//! - **Unique names**: `{likes}.jpg`, with the upload date appended on collision
//! - **Isolated failures**: a photo that fails to download or upload is
//!   logged and skipped, the rest of the batch continues
//! - **Manifest**: `photo_info.json` listing every file name and size label
//!
//! # Example
//!
//! ```no_run
//! use vk_backup::{run_backup, BackupRequest, DiskClient, DiskConfig, PhotoSource, VkConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PhotoSource::new(VkConfig { token: "vk-token".into(), ..Default::default() })?;
//! let disk = DiskClient::new(DiskConfig { token: "yd-token".into(), ..Default::default() })?;
//!
//! run_backup(&source, &disk, &BackupRequest::new("1")).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod disk;
mod error;
mod manifest;
mod orchestrator;
mod prompt;
mod ranking;
mod types;
mod vk;

#[cfg(test)]
mod test_support;

pub use self::config::{ApiSettings, Settings, Tokens};
pub use disk::DiskClient;
pub use error::BackupError;
pub use manifest::{format_upload_date, Manifest, ManifestEntry};
pub use orchestrator::{run_backup, BackupReport};
pub use prompt::{parse_count, prompt_count, prompt_user_id, DEFAULT_PHOTO_COUNT};
pub use ranking::{best_area, best_size, rank_photos};
pub use types::{BackupRequest, DiskConfig, Likes, Photo, PhotoSize, VkConfig};
pub use vk::PhotoSource;
