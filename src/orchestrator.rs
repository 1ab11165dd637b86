//! Main backup flow: fetch, rank, upload and record.

use crate::disk::DiskClient;
use crate::error::BackupError;
use crate::manifest::{format_upload_date, Manifest};
use crate::ranking::{best_size, rank_photos};
use crate::types::BackupRequest;
use crate::vk::PhotoSource;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupReport {
    /// Entries written to the manifest, in processing order.
    pub manifest: Manifest,
    /// Photos stored on Yandex.Disk.
    pub uploaded: usize,
    /// Photos whose download from VK failed.
    pub download_failed: usize,
    /// Photos downloaded but rejected by Yandex.Disk.
    pub upload_failed: usize,
    /// Photos without a usable URL; these have no manifest entry.
    pub skipped: usize,
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg} | {elapsed_precise} elapsed")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// Backs up the best photos of `request.user_id` to Yandex.Disk.
///
/// This is the main entry point. It performs the following steps:
///
/// 1. Fetches the photo list and ranks it by likes, then resolution
/// 2. Ensures the destination folder exists (aborts the run if it cannot)
/// 3. For each photo: picks a unique file name, records it in the manifest,
///    downloads the largest variant and uploads it
/// 4. Writes the manifest to `request.manifest_path`
///
/// Per-photo failures are logged and counted; they never stop the run.
///
/// # Returns
///
/// The run report, or [`BackupError::FolderUnavailable`] if the folder could
/// not be ensured. Transport errors while listing photos and manifest write
/// errors are returned as well.
///
/// # Example
///
/// ```no_run
/// use vk_backup::{run_backup, BackupRequest, DiskClient, DiskConfig, PhotoSource, VkConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = PhotoSource::new(VkConfig { token: "vk".into(), ..Default::default() })?;
/// let disk = DiskClient::new(DiskConfig { token: "yd".into(), ..Default::default() })?;
/// let report = run_backup(&source, &disk, &BackupRequest::new("1")).await?;
/// println!("{} photos uploaded", report.uploaded);
/// # Ok(())
/// # }
/// ```
pub async fn run_backup(
    source: &PhotoSource,
    disk: &DiskClient,
    request: &BackupRequest,
) -> Result<BackupReport, BackupError> {
    let photos = source
        .get_photos(&request.user_id, request.count, &request.album_id)
        .await?;
    let ranked = rank_photos(&photos);

    let folder_name = request.folder_name();
    if !disk.ensure_folder_exists(&folder_name).await {
        error!("Could not create folder {} on Yandex.Disk, stopping", folder_name);
        return Err(BackupError::FolderUnavailable(folder_name));
    }

    let mut report = BackupReport::default();
    let pb = progress_bar(ranked.len());
    pb.set_message("📷 Uploading photos");

    for photo in &ranked {
        let upload_date = format_upload_date(photo.date);
        let file_name = report
            .manifest
            .file_name_for(photo.likes_count(), &upload_date, photo.id);

        let best = best_size(photo).filter(|size| !size.url.is_empty());
        let Some(best) = best else {
            warn!("No URL found for photo {}, skipping", photo.id);
            report.skipped += 1;
            pb.inc(1);
            continue;
        };

        report
            .manifest
            .push(file_name.clone(), best.size_type.clone());
        pb.set_message(format!("| ⬇️  {}", file_name));

        let content = match source.download_photo(&best.url).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to download {} from VK: {}", file_name, e);
                report.download_failed += 1;
                pb.inc(1);
                continue;
            }
        };

        pb.set_message(format!("| ⬆️  {}", file_name));
        if disk.upload_file(content, &file_name, &folder_name).await {
            report.uploaded += 1;
        } else {
            report.upload_failed += 1;
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("✅ Processed {} photos", ranked.len()));

    report.manifest.save(&request.manifest_path)?;
    info!(
        "Backup finished: {} uploaded, {} download failures, {} upload failures, {} skipped",
        report.uploaded, report.download_failed, report.upload_failed, report.skipped
    );
    Ok(report)
}
