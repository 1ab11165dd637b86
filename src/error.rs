//! Error types for backup operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while backing up photos.
#[derive(Error, Debug)]
pub enum BackupError {
    /// I/O error while writing the manifest or reading input.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// HTTP transport error (connect, timeout, body read).
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// Settings file or environment could not be loaded.
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    /// A remote API answered with an unexpected status.
    #[error("HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The upload-link response carried no `href`.
    #[error("upload link not found in response")]
    MissingUploadHref,

    /// The destination folder could neither be found nor created.
    #[error("could not create folder '{0}' on Yandex.Disk")]
    FolderUnavailable(String),

    /// User input that cannot be used (empty user id, bad count).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BackupError {
    /// Builds an [`BackupError::Http`] from a non-success response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        BackupError::Http { status, body }
    }
}
