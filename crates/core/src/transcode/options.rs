use crate::shared::constants::DEFAULT_PRESET;

/// Tunables for one transcode run.
#[derive(Clone, Debug)]
pub struct TranscodeOptions {
    /// Worker threads for the encoder; 0 lets the codec pick.
    /// Parallelism is internal to the encoder, the pipeline itself is
    /// a single sequential pass.
    pub threads: usize,
    /// x265 speed/quality preset.
    pub preset: String,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            preset: DEFAULT_PRESET.to_string(),
        }
    }
}
