use std::path::Path;

use ffmpeg_next::{frame, Packet};
use log::info;

use crate::error::TranscodeError;
use crate::shared::constants::TARGET_PIXEL_FORMAT;
use crate::transcode::options::TranscodeOptions;
use crate::transcode::pipeline::{PipelineStats, TranscodePipeline};
use crate::video::infrastructure::ffmpeg_decoder::FfmpegDecoder;
use crate::video::infrastructure::ffmpeg_encoder::EncoderConfig;
use crate::video::infrastructure::ffmpeg_input::FfmpegInput;
use crate::video::infrastructure::ffmpeg_output::FfmpegOutput;
use crate::video::infrastructure::scaling_converter::ScalingConverter;

/// Transcode one input file into an H.265 MP4 in a single demux pass.
///
/// The output keeps the input's geometry, aspect ratio and frame rate;
/// only the codec, pixel format and container change. Audio and other
/// non-video streams are dropped.
pub struct TranscodeUseCase {
    options: TranscodeOptions,
}

impl TranscodeUseCase {
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    pub fn execute(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<PipelineStats, TranscodeError> {
        let mut input = FfmpegInput::open(input_path)?;
        {
            let meta = input.metadata();
            info!(
                "input: {} {}x{} at {:.2} fps",
                meta.codec, meta.width, meta.height, meta.fps
            );
        }

        let decoder = input.open_decoder()?;
        let config = EncoderConfig::from_decoder(&decoder, input.stream_rate(), &self.options);

        let converter = ScalingConverter::new(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            TARGET_PIXEL_FORMAT,
            config.width,
            config.height,
        )?;

        // The output owns the muxer; the pipeline only borrows it so the
        // trailer can be written after the flush completes.
        let (mut output, encoder) = FfmpegOutput::create(output_path, &config)?;

        let stream_index = input.stream_index();
        let mut pipeline = TranscodePipeline::new(
            FfmpegDecoder::new(decoder),
            encoder,
            converter,
            &mut output,
            stream_index,
            frame::Video::empty(),
            Packet::empty(),
        );

        for (stream, packet) in input.packets() {
            pipeline.feed(stream.index(), &packet)?;
        }

        let stats = pipeline.finish()?;
        output.finalize()?;

        info!(
            "wrote {} packets from {} decoded frames to {}",
            stats.packets_written,
            stats.frames_decoded,
            output_path.display()
        );
        Ok(stats)
    }
}
