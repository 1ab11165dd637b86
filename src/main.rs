use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use vk_backup::{
    prompt_count, prompt_user_id, run_backup, BackupRequest, DiskClient, PhotoSource, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "vk-backup")]
#[command(about = "Back up a VK user's best photos to Yandex.Disk", long_about = None)]
#[command(version)]
struct Args {
    /// Settings file with a [Tokens] section (vk_token, yd_token)
    #[arg(short, long, default_value = "settings.ini")]
    config: PathBuf,

    /// VK user ID (prompted for when omitted)
    #[arg(short, long)]
    user_id: Option<String>,

    /// Number of photos to back up (prompted for when omitted)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// VK album to read: profile, wall, saved or a numeric album id
    #[arg(short, long, default_value = "profile")]
    album: String,

    /// Manifest output file
    #[arg(short, long, default_value = "photo_info.json")]
    output: PathBuf,

    /// Yandex.Disk folder name prefix; the user ID is appended
    #[arg(long, default_value = "backup_")]
    folder_prefix: String,

    /// Per-request timeout (e.g. "30s", "2m")
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("vk_backup={}", log_level))
        .init();

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Failed to load settings from {:?}", args.config))?;
    let source = PhotoSource::new(settings.vk_config(args.timeout))
        .context("Failed to initialize VK client")?;
    let disk = DiskClient::new(settings.disk_config(args.timeout))
        .context("Failed to initialize Yandex.Disk client")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let user_id = match args.user_id {
        Some(user_id) => user_id,
        None => prompt_user_id(&mut input, &mut output)?,
    };
    let count = match args.count {
        Some(count) => count,
        None => prompt_count(&mut input, &mut output)?,
    };
    drop(input);

    let request = BackupRequest {
        count,
        album_id: args.album,
        folder_prefix: args.folder_prefix,
        manifest_path: args.output,
        ..BackupRequest::new(user_id)
    };

    info!("🚀 vk-backup");
    info!("User: {}, photos: {}, album: {}", request.user_id, request.count, request.album_id);

    match run_backup(&source, &disk, &request).await {
        Ok(report) => {
            info!(
                "✅ Done: {} of {} photos uploaded, manifest written to {:?}",
                report.uploaded,
                report.manifest.len(),
                request.manifest_path
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
