use ffmpeg_next::format::Pixel;

/// Pixel format every frame is converted to before encoding.
/// YUV420P is what H.265 encoders commonly expect.
pub const TARGET_PIXEL_FORMAT: Pixel = Pixel::YUV420P;

/// Container format of the output file.
pub const OUTPUT_CONTAINER: &str = "mp4";

/// Default x265 speed/quality preset.
pub const DEFAULT_PRESET: &str = "medium";

/// Frame rate assumed when neither the decoder nor the input stream
/// reports one.
pub const FALLBACK_FRAME_RATE: i32 = 30;
