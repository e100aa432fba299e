use crate::error::TranscodeError;

/// Destination for encoded packets.
///
/// `write` takes the packet mutably because muxers rebase timestamps and
/// release the payload on consumption, leaving the shell for reuse.
pub trait PacketSink {
    type Packet;

    fn write(&mut self, packet: &mut Self::Packet) -> Result<(), TranscodeError>;
}

impl<S: PacketSink> PacketSink for &mut S {
    type Packet = S::Packet;

    fn write(&mut self, packet: &mut Self::Packet) -> Result<(), TranscodeError> {
        (**self).write(packet)
    }
}
