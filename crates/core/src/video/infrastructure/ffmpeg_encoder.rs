use ffmpeg_next::util::error::EAGAIN;
use ffmpeg_next::{codec, decoder, encoder, frame, Codec, Dictionary, Error, Packet, Rational};

use crate::error::TranscodeError;
use crate::shared::constants::{FALLBACK_FRAME_RATE, TARGET_PIXEL_FORMAT};
use crate::transcode::options::TranscodeOptions;
use crate::video::domain::codec_stage::{CodecStage, Drain};

/// Encoder parameters, derived from the decoder so the output mirrors the
/// input's geometry and timing.
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: Rational,
    pub frame_rate: Rational,
    pub preset: String,
    pub threads: usize,
}

impl EncoderConfig {
    /// Copy width, height and sample aspect ratio from the decoder.
    ///
    /// The frame rate prefers what the decoder reports, then the input
    /// stream's declared rate, then a fixed fallback for sources that
    /// state neither.
    pub fn from_decoder(
        decoder: &decoder::Video,
        stream_rate: Rational,
        options: &TranscodeOptions,
    ) -> Self {
        let frame_rate = select_frame_rate(decoder.frame_rate(), stream_rate);

        Self {
            width: decoder.width(),
            height: decoder.height(),
            aspect_ratio: decoder.aspect_ratio(),
            frame_rate,
            preset: options.preset.clone(),
            threads: options.threads,
        }
    }

    /// Encoder time base: the reciprocal of the frame rate.
    pub fn time_base(&self) -> Rational {
        self.frame_rate.invert()
    }
}

/// Decoder-reported rate wins, then the stream's declared rate, then the
/// fixed fallback for sources that state neither.
fn select_frame_rate(decoder_rate: Option<Rational>, stream_rate: Rational) -> Rational {
    decoder_rate
        .filter(|rate| rate.numerator() > 0)
        .or_else(|| (stream_rate.numerator() > 0).then_some(stream_rate))
        .unwrap_or(Rational(FALLBACK_FRAME_RATE, 1))
}

/// Opened H.265 encoder session as a buffering codec stage.
pub struct FfmpegEncoder {
    inner: encoder::video::Encoder,
}

impl FfmpegEncoder {
    /// Find the HEVC encoder and open it with the derived parameters.
    ///
    /// `global_header` must be set when the target container carries codec
    /// parameters in its own header (MP4 does). The preset and thread
    /// count travel through the codec's option dictionary.
    pub fn open(
        config: &EncoderConfig,
        global_header: bool,
    ) -> Result<(Self, Codec), TranscodeError> {
        let codec =
            encoder::find(codec::Id::HEVC).ok_or(TranscodeError::EncoderNotFound)?;

        let mut ctx = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(TranscodeError::EncoderSetup)?;

        ctx.set_width(config.width);
        ctx.set_height(config.height);
        ctx.set_aspect_ratio(config.aspect_ratio);
        ctx.set_format(TARGET_PIXEL_FORMAT);
        ctx.set_time_base(config.time_base());
        ctx.set_frame_rate(Some(config.frame_rate));
        if global_header {
            ctx.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let mut opts = Dictionary::new();
        opts.set("preset", &config.preset);
        opts.set("threads", &config.threads.to_string());

        let inner = ctx.open_with(opts).map_err(TranscodeError::EncoderSetup)?;
        Ok((Self { inner }, codec))
    }

    pub fn time_base(&self) -> Rational {
        self.inner.time_base()
    }

    /// Borrow the opened encoder, e.g. to copy its parameters onto an
    /// output stream.
    pub fn inner(&self) -> &encoder::video::Encoder {
        &self.inner
    }
}

impl CodecStage for FfmpegEncoder {
    type In = frame::Video;
    type Out = Packet;

    fn submit(&mut self, frame: &frame::Video) -> Result<(), TranscodeError> {
        self.inner.send_frame(frame).map_err(TranscodeError::Encode)
    }

    fn drain(&mut self, output: &mut Packet) -> Result<Drain, TranscodeError> {
        match self.inner.receive_packet(output) {
            Ok(()) => Ok(Drain::Received),
            Err(Error::Other { errno: EAGAIN }) => Ok(Drain::NeedsInput),
            Err(Error::Eof) => Ok(Drain::EndOfStream),
            Err(e) => Err(TranscodeError::Encode(e)),
        }
    }

    fn flush(&mut self) -> Result<(), TranscodeError> {
        match self.inner.send_eof() {
            Ok(()) | Err(Error::Eof) => Ok(()),
            Err(e) => Err(TranscodeError::Encode(e)),
        }
    }
}
