use serde::{Deserialize, Serialize};

pub const PROJECT_NAME: &str = "Complete Video Tutorial Collection";

/// Records per batch, the downstream analysis tool's ingestion unit.
pub const BATCH_SIZE: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project_name: String,
    pub total_videos: u64,
    pub total_frames: u64,
    pub batches: Vec<Batch>,
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            project_name: PROJECT_NAME.to_string(),
            total_videos: 0,
            total_frames: 0,
            batches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: u64,
    pub video_id: String,
    pub video_title: String,
    pub frames: Vec<String>,
    pub frame_numbers: Vec<u64>,
    pub timestamps: Vec<String>,
    pub transcript_preview: String,
    pub frame_count: usize,
}
