use crate::error::TranscodeError;
use crate::video::domain::codec_stage::{CodecStage, Drain};
use crate::video::domain::frame_converter::FrameConverter;
use crate::video::domain::packet_sink::PacketSink;

/// Counters accumulated over one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_decoded: usize,
    pub packets_written: usize,
}

/// The core transcode loop: packet → decoder → converter → encoder → sink.
///
/// Both codec stages may buffer internally, so every submission is paired
/// with a drain-until-empty loop; skipping a drain would lose frames,
/// while treating the benign [`Drain`] signals as failures would abort
/// normal flow control. Packets from streams other than `video_stream`
/// are dropped without touching the decoder.
///
/// The pipeline owns one reusable decoded-frame buffer and one reusable
/// encoded-packet buffer; the converter owns the converted-frame buffer.
pub struct TranscodePipeline<D, E, C, S>
where
    D: CodecStage,
    E: CodecStage,
    C: FrameConverter<Src = D::Out, Dst = E::In>,
    S: PacketSink<Packet = E::Out>,
{
    decoder: D,
    encoder: E,
    converter: C,
    sink: S,
    video_stream: usize,
    decoded: D::Out,
    encoded: E::Out,
    stats: PipelineStats,
}

impl<D, E, C, S> TranscodePipeline<D, E, C, S>
where
    D: CodecStage,
    E: CodecStage,
    C: FrameConverter<Src = D::Out, Dst = E::In>,
    S: PacketSink<Packet = E::Out>,
{
    pub fn new(
        decoder: D,
        encoder: E,
        converter: C,
        sink: S,
        video_stream: usize,
        decoded: D::Out,
        encoded: E::Out,
    ) -> Self {
        Self {
            decoder,
            encoder,
            converter,
            sink,
            video_stream,
            decoded,
            encoded,
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Feed one demuxed packet through the pipeline.
    ///
    /// Non-video packets are consumed and ignored; the caller's packet
    /// buffer is free for reuse as soon as this returns.
    pub fn feed(&mut self, stream_index: usize, packet: &D::In) -> Result<(), TranscodeError> {
        if stream_index != self.video_stream {
            return Ok(());
        }
        self.decoder.submit(packet)?;
        self.drain_decoder()
    }

    /// Flush both codecs, drain everything they still hold, and return
    /// the final counters.
    pub fn finish(mut self) -> Result<PipelineStats, TranscodeError> {
        self.decoder.flush()?;
        self.drain_decoder()?;
        self.encoder.flush()?;
        self.drain_encoder()?;
        Ok(self.stats)
    }

    fn drain_decoder(&mut self) -> Result<(), TranscodeError> {
        loop {
            match self.decoder.drain(&mut self.decoded)? {
                Drain::Received => {
                    self.stats.frames_decoded += 1;
                    let converted = self.converter.convert(&self.decoded)?;
                    self.encoder.submit(converted)?;
                    self.drain_encoder()?;
                }
                Drain::NeedsInput | Drain::EndOfStream => return Ok(()),
            }
        }
    }

    fn drain_encoder(&mut self) -> Result<(), TranscodeError> {
        loop {
            match self.encoder.drain(&mut self.encoded)? {
                Drain::Received => {
                    self.sink.write(&mut self.encoded)?;
                    self.stats.packets_written += 1;
                }
                Drain::NeedsInput | Drain::EndOfStream => return Ok(()),
            }
        }
    }
}
