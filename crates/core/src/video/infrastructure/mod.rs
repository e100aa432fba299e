pub mod ffmpeg_decoder;
pub mod ffmpeg_encoder;
pub mod ffmpeg_input;
pub mod ffmpeg_output;
pub mod scaling_converter;
