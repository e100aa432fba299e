//! Single-pass video transcoding: decode any input container/codec,
//! convert pixel format, re-encode to H.265, mux into MP4.
//!
//! The crate is split into domain seams (buffering codec stages, frame
//! conversion, packet sinks) and ffmpeg-next infrastructure implementing
//! them. [`transcode::transcode_use_case::TranscodeUseCase`] wires both
//! sides together and is the only entry point callers need.

pub mod error;
pub mod shared;
pub mod transcode;
pub mod video;

pub use error::TranscodeError;
pub use transcode::options::TranscodeOptions;
pub use transcode::transcode_use_case::TranscodeUseCase;
