pub mod codec_stage;
pub mod frame_converter;
pub mod packet_sink;
