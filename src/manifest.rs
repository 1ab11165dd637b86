//! Backup manifest: per-photo records, unique file names and JSON persistence.

use crate::error::BackupError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Format of the timestamp suffix used to disambiguate file names.
const DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// One backed-up photo as recorded in `photo_info.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
    /// VK size label of the uploaded variant.
    pub size: String,
}

/// Ordered list of manifest entries for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

/// Formats a unix timestamp in local time, e.g. `2023-11-14_22-13-20`.
///
/// Out-of-range timestamps are treated as the epoch.
pub fn format_upload_date(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format(DATE_FORMAT)
        .to_string()
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_file_name(&self, file_name: &str) -> bool {
        self.entries.iter().any(|e| e.file_name == file_name)
    }

    /// File name for photo `photo_id` with `likes` likes uploaded at `upload_date`.
    ///
    /// `{likes}.jpg` unless that name is already taken in this manifest, in
    /// which case the formatted upload date is appended:
    /// `{likes}_{upload_date}.jpg`. Photos sharing likes and upload second
    /// fall back to `{likes}_{upload_date}_{photo_id}.jpg`, then to a numeric
    /// counter. Only entries recorded so far are checked.
    pub fn file_name_for(&self, likes: u64, upload_date: &str, photo_id: i64) -> String {
        let base = format!("{}.jpg", likes);
        if !self.contains_file_name(&base) {
            return base;
        }
        let dated = format!("{}_{}.jpg", likes, upload_date);
        if !self.contains_file_name(&dated) {
            return dated;
        }
        let stem = format!("{}_{}_{}", likes, upload_date, photo_id);
        let mut candidate = format!("{}.jpg", stem);
        let mut counter = 1u32;
        while self.contains_file_name(&candidate) {
            counter += 1;
            candidate = format!("{}_{}.jpg", stem, counter);
        }
        candidate
    }

    pub fn push(&mut self, file_name: String, size: String) {
        self.entries.push(ManifestEntry { file_name, size });
    }

    /// Serializes the manifest as a JSON array with 4-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>, BackupError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.entries.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// Writes the manifest to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<(), BackupError> {
        std::fs::write(path, self.to_json()?)?;
        info!("Persisted manifest with {} entries to {:?}", self.len(), path);
        Ok(())
    }

    /// Reads a manifest written by [`Manifest::save`].
    pub fn load(path: &Path) -> Result<Self, BackupError> {
        let content = std::fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(Self { entries })
    }
}
