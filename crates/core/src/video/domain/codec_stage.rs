use crate::error::TranscodeError;

/// Outcome of pulling one buffered unit out of a codec.
///
/// `NeedsInput` and `EndOfStream` are flow control, not errors: they end
/// the current drain loop and let the caller feed more input (or stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drain {
    /// A unit was produced into the caller's buffer.
    Received,
    /// The codec has nothing buffered; feed it more input.
    NeedsInput,
    /// The codec was flushed and will never produce output again.
    EndOfStream,
}

/// A stateful codec that may buffer an arbitrary number of units between
/// input and output (B-frame reordering, encoder lookahead).
///
/// Every `submit` must be followed by draining until [`Drain::NeedsInput`]
/// or [`Drain::EndOfStream`]; submitting again earlier loses buffered
/// output. The output buffer is reused across calls: `drain` overwrites
/// it and releases the previous payload.
pub trait CodecStage {
    type In;
    type Out;

    /// Hand one input unit to the codec.
    fn submit(&mut self, input: &Self::In) -> Result<(), TranscodeError>;

    /// Pull one buffered output unit into `output`.
    fn drain(&mut self, output: &mut Self::Out) -> Result<Drain, TranscodeError>;

    /// Signal end of input so the remaining buffered units can be drained.
    fn flush(&mut self) -> Result<(), TranscodeError>;
}
