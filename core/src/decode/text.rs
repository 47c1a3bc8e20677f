use crate::decode::BodyDecoder;
use crate::error::DecodeError;

/// Decodes a body as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecoder;

impl BodyDecoder for StringDecoder {
    type Parsed = String;
    type Output = String;

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
