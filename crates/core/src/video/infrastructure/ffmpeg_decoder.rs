use ffmpeg_next::util::error::EAGAIN;
use ffmpeg_next::{decoder, frame, Error, Packet};

use crate::error::TranscodeError;
use crate::video::domain::codec_stage::{CodecStage, Drain};

/// Decoder session as a buffering codec stage.
///
/// ffmpeg signals "feed me more" as EAGAIN and "fully flushed" as EOF on
/// `receive_frame`; both are normal flow control, everything else is a
/// hard decode error.
pub struct FfmpegDecoder {
    inner: decoder::Video,
}

impl FfmpegDecoder {
    pub fn new(inner: decoder::Video) -> Self {
        Self { inner }
    }
}

impl CodecStage for FfmpegDecoder {
    type In = Packet;
    type Out = frame::Video;

    fn submit(&mut self, packet: &Packet) -> Result<(), TranscodeError> {
        self.inner
            .send_packet(packet)
            .map_err(TranscodeError::Decode)
    }

    fn drain(&mut self, output: &mut frame::Video) -> Result<Drain, TranscodeError> {
        match self.inner.receive_frame(output) {
            Ok(()) => Ok(Drain::Received),
            Err(Error::Other { errno: EAGAIN }) => Ok(Drain::NeedsInput),
            Err(Error::Eof) => Ok(Drain::EndOfStream),
            Err(e) => Err(TranscodeError::Decode(e)),
        }
    }

    fn flush(&mut self) -> Result<(), TranscodeError> {
        match self.inner.send_eof() {
            Ok(()) | Err(Error::Eof) => Ok(()),
            Err(e) => Err(TranscodeError::Decode(e)),
        }
    }
}
