use std::path::Path;

use ffmpeg_next::format::{self, context::Input};
use ffmpeg_next::media;
use ffmpeg_next::{codec, decoder, Error, Rational};

use crate::error::TranscodeError;
use crate::shared::video_metadata::VideoMetadata;

/// An opened input container with its best video stream selected.
///
/// Opening probes the stream info in the same call, so a probe failure
/// surfaces as an open failure. Streams of other media kinds stay in the
/// container but are never decoded.
pub struct FfmpegInput {
    ictx: Input,
    stream_index: usize,
    metadata: VideoMetadata,
}

impl FfmpegInput {
    pub fn open(path: &Path) -> Result<Self, TranscodeError> {
        ffmpeg_next::init().map_err(TranscodeError::Init)?;

        let ictx = format::input(&path).map_err(|source| TranscodeError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        let stream = ictx
            .streams()
            .best(media::Type::Video)
            .ok_or(TranscodeError::NoVideoStream)?;
        let stream_index = stream.index();

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            0.0
        };

        // Probe geometry through a throwaway decoder context; the actual
        // decoding session is built separately by open_decoder().
        let probe = codec::context::Context::from_parameters(stream.parameters())
            .map_err(TranscodeError::DecoderSetup)?
            .decoder()
            .video()
            .map_err(TranscodeError::DecoderSetup)?;

        let metadata = VideoMetadata {
            width: probe.width(),
            height: probe.height(),
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: probe
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        Ok(Self {
            ictx,
            stream_index,
            metadata,
        })
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Declared frame rate of the selected stream (r_frame_rate).
    pub fn stream_rate(&self) -> Rational {
        self.ictx
            .stream(self.stream_index)
            .map(|s| s.rate())
            .unwrap_or(Rational(0, 1))
    }

    /// Build a decoder session matching the selected stream's codec.
    pub fn open_decoder(&self) -> Result<decoder::Video, TranscodeError> {
        let stream = self
            .ictx
            .stream(self.stream_index)
            .ok_or(TranscodeError::NoVideoStream)?;
        let ctx = codec::context::Context::from_parameters(stream.parameters())
            .map_err(TranscodeError::DecoderSetup)?;
        match ctx.decoder().video() {
            Ok(decoder) => Ok(decoder),
            Err(Error::DecoderNotFound) => Err(TranscodeError::DecoderNotFound {
                codec: self.metadata.codec.clone(),
            }),
            Err(e) => Err(TranscodeError::DecoderSetup(e)),
        }
    }

    /// Demuxed packets in file order, across all streams.
    pub fn packets(&mut self) -> format::context::input::PacketIter<'_> {
        self.ictx.packets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{create_test_video, write_wav};
    use approx::assert_relative_eq;

    #[test]
    fn test_open_nonexistent_file_fails() {
        let err = FfmpegInput::open(Path::new("/nonexistent/input.mp4")).err().unwrap();
        assert!(matches!(err, TranscodeError::OpenInput { .. }));
        assert!(err.to_string().contains("/nonexistent/input.mp4"));
    }

    #[test]
    fn test_audio_only_input_has_no_video_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path);

        let err = FfmpegInput::open(&path).err().unwrap();
        assert!(matches!(err, TranscodeError::NoVideoStream));
    }

    #[test]
    fn test_open_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        create_test_video(&path, 5, 160, 120, 30);

        let input = FfmpegInput::open(&path).unwrap();
        let meta = input.metadata();
        assert_eq!(meta.width, 160);
        assert_eq!(meta.height, 120);
        assert_relative_eq!(meta.fps, 30.0, epsilon = 0.5);
        assert_eq!(meta.source_path, Some(path));
    }

    #[test]
    fn test_open_decoder_matches_stream_codec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        create_test_video(&path, 3, 160, 120, 30);

        let input = FfmpegInput::open(&path).unwrap();
        let decoder = input.open_decoder().unwrap();
        assert_eq!(decoder.width(), 160);
        assert_eq!(decoder.height(), 120);
    }

    #[test]
    fn test_packets_cover_all_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        create_test_video(&path, 4, 160, 120, 30);

        let mut input = FfmpegInput::open(&path).unwrap();
        let video_index = input.stream_index();
        let count = input
            .packets()
            .filter(|(stream, _)| stream.index() == video_index)
            .count();
        assert_eq!(count, 4);
    }
}
