mod builder;
mod manifest;
mod timeline;
mod util;

use anyhow::Result;
use builder::BuildOutcome;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "framebatch",
    version,
    about = "Aggregate per-video synchronized timelines into fixed-size keyframe batches"
)]
struct Cli {
    /// Directory holding one synchronized subdirectory per video.
    #[arg(long, default_value = "../synchronized")]
    sync_dir: PathBuf,

    /// Base directory holding the extracted <video_id>_keyframes directories.
    #[arg(long, default_value = "../frames")]
    frames_dir: PathBuf,

    /// Where to write the aggregated batch manifest.
    #[arg(long, default_value = "batches.json")]
    output: PathBuf,

    /// Suppress the progress bar.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let started = Instant::now();

    let outcome = builder::build_manifest(&cli.sync_dir, &cli.frames_dir, cli.quiet)?;
    builder::write_manifest(&outcome.manifest, &cli.output)?;

    eprintln!(
        "Batch scan: duration={} dirs={} skipped_timeline={} skipped_keyframes={}",
        fmt_duration(started.elapsed()),
        outcome.scanned_dirs,
        outcome.skipped_no_timeline,
        outcome.skipped_no_keyframes,
    );

    print_build_summary(&outcome, &cli.output)
}

fn print_build_summary(outcome: &BuildOutcome, output: &Path) -> Result<()> {
    println!("Created {}", output.display());
    println!("  videos: {}", outcome.manifest.total_videos);
    println!("  total frames: {}", outcome.manifest.total_frames);
    println!("  batches: {}", outcome.manifest.batches.len());
    println!("  avg batch size: {:.1} frames", outcome.average_batch_size()?);
    Ok(())
}

fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}
