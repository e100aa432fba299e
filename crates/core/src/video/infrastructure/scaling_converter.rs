use ffmpeg_next::format::Pixel;
use ffmpeg_next::frame;
use ffmpeg_next::software::scaling;

use crate::error::TranscodeError;
use crate::video::domain::frame_converter::FrameConverter;

/// Bicubic pixel-format/colorspace converter backed by swscale.
///
/// The destination frame is allocated once at the encoder's geometry and
/// format and rewritten on every call; its format and dimensions never
/// change for the lifetime of the converter.
pub struct ScalingConverter {
    scaler: scaling::Context,
    converted: frame::Video,
}

impl ScalingConverter {
    pub fn new(
        src_format: Pixel,
        src_width: u32,
        src_height: u32,
        dst_format: Pixel,
        dst_width: u32,
        dst_height: u32,
    ) -> Result<Self, TranscodeError> {
        let scaler = scaling::Context::get(
            src_format,
            src_width,
            src_height,
            dst_format,
            dst_width,
            dst_height,
            scaling::Flags::BICUBIC,
        )
        .map_err(TranscodeError::ConverterSetup)?;

        let mut converted = frame::Video::new(dst_format, dst_width, dst_height);
        converted.set_pts(Some(0));

        Ok(Self { scaler, converted })
    }
}

impl FrameConverter for ScalingConverter {
    type Src = frame::Video;
    type Dst = frame::Video;

    /// Convert into the reused destination frame, carrying over the
    /// source frame's presentation timestamp.
    fn convert(&mut self, src: &frame::Video) -> Result<&mut frame::Video, TranscodeError> {
        self.scaler
            .run(src, &mut self.converted)
            .map_err(TranscodeError::Convert)?;
        self.converted.set_pts(src.pts());
        Ok(&mut self.converted)
    }
}
