use crate::error::TranscodeError;

/// Converts decoded frames into the layout the encoder expects.
///
/// Implementations own a single destination buffer with fixed geometry
/// and format; `convert` overwrites it and returns a borrow, so the
/// result must be consumed before the next call.
pub trait FrameConverter {
    type Src;
    type Dst;

    fn convert(&mut self, src: &Self::Src) -> Result<&mut Self::Dst, TranscodeError>;
}
