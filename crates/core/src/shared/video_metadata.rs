use std::path::PathBuf;

/// Facts probed from the selected video stream of an input file.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Declared frame count; 0 when the container does not record one.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
