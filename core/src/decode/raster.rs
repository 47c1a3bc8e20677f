use image::DynamicImage;

use crate::decode::BodyDecoder;
use crate::error::DecodeError;

/// Decodes an encoded raster image. The format is sniffed from the bytes;
/// PNG, JPEG and GIF are supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl BodyDecoder for ImageDecoder {
    type Parsed = DynamicImage;
    type Output = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        Ok(image::load_from_memory(bytes)?)
    }
}
