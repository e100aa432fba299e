use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong during one transcode run.
///
/// Each variant names the pipeline step that failed so callers can report
/// a precise diagnostic. Setup variants abort before any frame data is
/// processed; the decode/convert/encode/write variants abort mid-loop and
/// leave the output without a trailer.
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("failed to initialize the codec library: {0}")]
    Init(#[source] ffmpeg_next::Error),

    #[error("could not open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: ffmpeg_next::Error,
    },

    #[error("no video stream found in input")]
    NoVideoStream,

    #[error("no decoder available for codec {codec:?}")]
    DecoderNotFound { codec: String },

    #[error("failed to set up decoder: {0}")]
    DecoderSetup(#[source] ffmpeg_next::Error),

    #[error("HEVC encoder not available in this ffmpeg build")]
    EncoderNotFound,

    #[error("could not create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: ffmpeg_next::Error,
    },

    #[error("failed to set up encoder: {0}")]
    EncoderSetup(#[source] ffmpeg_next::Error),

    #[error("failed to allocate output stream: {0}")]
    NewStream(#[source] ffmpeg_next::Error),

    #[error("failed to write container header: {0}")]
    WriteHeader(#[source] ffmpeg_next::Error),

    #[error("could not initialize pixel format converter: {0}")]
    ConverterSetup(#[source] ffmpeg_next::Error),

    #[error("error during decoding: {0}")]
    Decode(#[source] ffmpeg_next::Error),

    #[error("pixel format conversion failed: {0}")]
    Convert(#[source] ffmpeg_next::Error),

    #[error("error during encoding: {0}")]
    Encode(#[source] ffmpeg_next::Error),

    #[error("error while writing output packet: {0}")]
    WritePacket(#[source] ffmpeg_next::Error),

    #[error("failed to write container trailer: {0}")]
    WriteTrailer(#[source] ffmpeg_next::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_input_names_the_path() {
        let err = TranscodeError::OpenInput {
            path: PathBuf::from("/tmp/missing.mkv"),
            source: ffmpeg_next::Error::InvalidData,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.mkv"));
        assert!(msg.contains("open input"));
    }

    #[test]
    fn test_decoder_not_found_names_the_codec() {
        let err = TranscodeError::DecoderNotFound {
            codec: "av1".to_string(),
        };
        assert!(err.to_string().contains("av1"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;

        let err = TranscodeError::Decode(ffmpeg_next::Error::InvalidData);
        assert!(err.source().is_some());
    }
}
