use crate::manifest::{Batch, Manifest, BATCH_SIZE};
use crate::timeline::{self, FrameRecord};
use crate::util;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Per-record transcript snippet length, in characters.
const SNIPPET_CHARS: usize = 50;
/// Whole-preview cap, in characters.
const PREVIEW_CHARS: usize = 200;

#[derive(Debug)]
pub struct BuildOutcome {
    pub manifest: Manifest,
    pub scanned_dirs: usize,
    pub skipped_no_timeline: usize,
    pub skipped_no_keyframes: usize,
}

impl BuildOutcome {
    /// Declared frame total divided by batch count. A run that produced no
    /// batches has no average; callers treat that as fatal.
    pub fn average_batch_size(&self) -> Result<f64> {
        if self.manifest.batches.is_empty() {
            bail!("no batches were produced, average batch size is undefined");
        }
        Ok(self.manifest.total_frames as f64 / self.manifest.batches.len() as f64)
    }
}

/// Scan `sync_dir` for per-video timelines, gate each video on its extracted
/// keyframe directory under `frames_dir`, and batch every accepted timeline
/// into chunks of at most [`BATCH_SIZE`] records.
///
/// Videos missing a timeline or a keyframe directory are skipped, not errors.
/// A timeline that exists but fails to parse aborts the run, even when the
/// keyframe check would have excluded that video afterwards.
pub fn build_manifest(sync_dir: &Path, frames_dir: &Path, quiet: bool) -> Result<BuildOutcome> {
    if !sync_dir.is_dir() {
        bail!("sync dir {} is not a directory", sync_dir.display());
    }

    let video_dirs = list_video_dirs(sync_dir)?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(video_dirs.len() as u64)
    };
    pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] {wide_bar} {pos}/{len} videos").unwrap());

    let mut outcome = BuildOutcome {
        manifest: Manifest::new(),
        scanned_dirs: video_dirs.len(),
        skipped_no_timeline: 0,
        skipped_no_keyframes: 0,
    };
    let mut next_batch_id: u64 = 1;

    for video_dir in &video_dirs {
        pb.inc(1);

        let timeline_path = video_dir.join("timeline.json");
        if !timeline_path.is_file() {
            outcome.skipped_no_timeline += 1;
            continue;
        }

        let doc = timeline::load(&timeline_path)?;
        let video_id = util::dir_name(video_dir);

        let keyframe_dir_name = format!("{video_id}_keyframes");
        if !frames_dir.join(&keyframe_dir_name).is_dir() {
            outcome.skipped_no_keyframes += 1;
            continue;
        }

        outcome.manifest.total_videos += 1;
        outcome.manifest.total_frames += doc.video_info.total_frames;

        let batches = video_batches(&video_id, &keyframe_dir_name, &doc.timeline, next_batch_id)?;
        next_batch_id += batches.len() as u64;
        outcome.manifest.batches.extend(batches);
    }

    pb.finish_and_clear();
    Ok(outcome)
}

pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(manifest)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn list_video_dirs(sync_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![];
    for entry in std::fs::read_dir(sync_dir)
        .with_context(|| format!("failed to read sync dir {}", sync_dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    // Stable order keeps batch ids deterministic across runs
    dirs.sort();
    Ok(dirs)
}

fn video_batches(
    video_id: &str,
    keyframe_dir_name: &str,
    records: &[FrameRecord],
    first_batch_id: u64,
) -> Result<Vec<Batch>> {
    let mut batches = vec![];
    for (i, chunk) in records.chunks(BATCH_SIZE).enumerate() {
        batches.push(batch_from_records(
            first_batch_id + i as u64,
            video_id,
            keyframe_dir_name,
            chunk,
        )?);
    }
    Ok(batches)
}

fn batch_from_records(
    batch_id: u64,
    video_id: &str,
    keyframe_dir_name: &str,
    records: &[FrameRecord],
) -> Result<Batch> {
    // Keep only the file name; the downstream tool resolves frames relative
    // to its own project root, under ../frames/<keyframe dir>/.
    let frames: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "../frames/{}/{}",
                keyframe_dir_name,
                util::file_name_component(&r.frame_path)
            )
        })
        .collect();
    let frame_count = frames.len();

    Ok(Batch {
        batch_id,
        video_id: video_id.to_string(),
        video_title: video_title(video_id)?,
        frames,
        frame_numbers: records.iter().map(|r| r.frame_number).collect(),
        timestamps: records.iter().map(|r| r.timestamp_formatted.clone()).collect(),
        transcript_preview: transcript_preview(records),
        frame_count,
    })
}

fn video_title(video_id: &str) -> Result<String> {
    let (_, rest) = video_id
        .split_once('-')
        .with_context(|| format!("video id {video_id:?} is missing its '-' separator"))?;
    Ok(rest.replace('_', " "))
}

fn transcript_preview(records: &[FrameRecord]) -> String {
    let snippets: Vec<String> = records
        .iter()
        .filter_map(|r| r.transcript.as_deref())
        .filter(|t| !t.is_empty())
        .map(transcript_snippet)
        .collect();
    let joined = snippets.join(" | ");
    util::truncate_chars(&joined, PREVIEW_CHARS).to_string()
}

fn transcript_snippet(text: &str) -> String {
    let cut = util::truncate_chars(text, SNIPPET_CHARS);
    if cut.len() < text.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}
