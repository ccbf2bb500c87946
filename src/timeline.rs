use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Per-video `timeline.json` document as produced by the sync pipeline.
/// Unknown keys are ignored; a missing `timeline` array means an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoTimeline {
    pub video_info: VideoInfo,
    #[serde(default)]
    pub timeline: Vec<FrameRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub total_frames: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    pub frame_path: String,
    pub frame_number: u64,
    pub timestamp_formatted: String,
    #[serde(default)]
    pub transcript: Option<String>,
}

pub fn load(path: &Path) -> Result<VideoTimeline> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read timeline {}", path.display()))?;
    let parsed = serde_json::from_slice(&raw)
        .with_context(|| format!("malformed timeline {}", path.display()))?;
    Ok(parsed)
}
