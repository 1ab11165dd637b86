//! Settings file loading (`settings.ini`) with environment overrides.

use crate::error::BackupError;
use crate::types::{
    DiskConfig, VkConfig, DEFAULT_DISK_BASE_URL, DEFAULT_VK_BASE_URL, DEFAULT_VK_VERSION,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Contents of the settings file.
///
/// ```ini
/// [Tokens]
/// vk_token = ...
/// yd_token = ...
///
/// [Api]
/// vk_version = 5.199
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API credentials
    #[serde(alias = "Tokens")]
    pub tokens: Tokens,
    /// Endpoint overrides
    #[serde(alias = "Api", default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tokens {
    pub vk_token: String,
    pub yd_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_vk_base_url")]
    pub vk_base_url: String,
    #[serde(default = "default_vk_version")]
    pub vk_version: String,
    #[serde(default = "default_disk_base_url")]
    pub disk_base_url: String,
}

fn default_vk_base_url() -> String {
    DEFAULT_VK_BASE_URL.to_string()
}

fn default_vk_version() -> String {
    DEFAULT_VK_VERSION.to_string()
}

fn default_disk_base_url() -> String {
    DEFAULT_DISK_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            vk_base_url: default_vk_base_url(),
            vk_version: default_vk_version(),
            disk_base_url: default_disk_base_url(),
        }
    }
}

impl Settings {
    /// Load settings from an INI file, then apply environment overrides
    /// (`VK_BACKUP__TOKENS__VK_TOKEN` -> `tokens.vk_token`).
    ///
    /// The file is optional as long as the environment supplies both tokens.
    pub fn load(path: &Path) -> Result<Self, BackupError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub(crate) fn load_with_env(
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, BackupError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Ini)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("VK_BACKUP")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn vk_config(&self, timeout: Duration) -> VkConfig {
        VkConfig {
            token: self.tokens.vk_token.clone(),
            base_url: self.api.vk_base_url.trim_end_matches('/').to_string(),
            version: self.api.vk_version.clone(),
            timeout,
        }
    }

    pub fn disk_config(&self, timeout: Duration) -> DiskConfig {
        let mut base_url = self.api.disk_base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        DiskConfig {
            token: self.tokens.yd_token.clone(),
            base_url,
            timeout,
        }
    }
}
