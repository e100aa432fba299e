use std::path::Path;

use ffmpeg_next::format::{self, context::Output};
use ffmpeg_next::{Packet, Rational};

use crate::error::TranscodeError;
use crate::shared::constants::OUTPUT_CONTAINER;
use crate::video::domain::packet_sink::PacketSink;
use crate::video::infrastructure::ffmpeg_encoder::{EncoderConfig, FfmpegEncoder};

/// MP4 output container with a single H.265 video stream.
///
/// Creating it opens the output file and writes the container header, so
/// from this point on the run is committed to producing that path. The
/// trailer is written only by [`FfmpegOutput::finalize`]; a run aborted
/// mid-loop leaves the file without one.
pub struct FfmpegOutput {
    octx: Output,
    stream_index: usize,
    encoder_time_base: Rational,
    stream_time_base: Rational,
}

impl FfmpegOutput {
    /// Allocate the MP4 container, open the encoder, create the output
    /// stream with the encoder's parameters and time base, and write the
    /// header.
    pub fn create(
        path: &Path,
        config: &EncoderConfig,
    ) -> Result<(Self, FfmpegEncoder), TranscodeError> {
        let mut octx = format::output_as(&path, OUTPUT_CONTAINER).map_err(|source| {
            TranscodeError::CreateOutput {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let global_header = octx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let (encoder, codec) = FfmpegEncoder::open(config, global_header)?;
        let encoder_time_base = encoder.time_base();

        let stream_index = {
            let mut ost = octx.add_stream(codec).map_err(TranscodeError::NewStream)?;
            ost.set_parameters(encoder.inner());
            ost.set_time_base(encoder_time_base);
            ost.index()
        };

        octx.write_header().map_err(TranscodeError::WriteHeader)?;

        // The muxer may rebase the stream while writing the header;
        // packets are rescaled into whatever it settled on.
        let stream_time_base = octx
            .stream(stream_index)
            .map(|s| s.time_base())
            .unwrap_or(encoder_time_base);

        Ok((
            Self {
                octx,
                stream_index,
                encoder_time_base,
                stream_time_base,
            },
            encoder,
        ))
    }

    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    pub fn stream_time_base(&self) -> Rational {
        self.stream_time_base
    }

    /// Write the container trailer, finalizing the file.
    pub fn finalize(mut self) -> Result<(), TranscodeError> {
        self.octx
            .write_trailer()
            .map_err(TranscodeError::WriteTrailer)
    }
}

impl PacketSink for FfmpegOutput {
    type Packet = Packet;

    /// Rebase the packet from encoder time to stream time, stamp it with
    /// the output stream index, and hand it to the interleaving muxer.
    /// The muxer releases the payload; the shell is reusable afterwards.
    fn write(&mut self, packet: &mut Packet) -> Result<(), TranscodeError> {
        packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
        packet.set_stream(self.stream_index);
        packet
            .write_interleaved(&mut self.octx)
            .map_err(TranscodeError::WritePacket)
    }
}
