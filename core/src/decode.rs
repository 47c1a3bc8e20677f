//! Response body decoders.
//!
//! # Design
//! A `BodyDecoder` is the response half of a `DataSource`. Each decoder is
//! bound to one parsed type at compile time (`Parsed`) and yields `Output`,
//! which is either that type or a collection of it. Decoding is pure and
//! returns a `DecodeError` naming what went wrong; `decode_opt` collapses
//! that to absence for callers that do not care why.

mod json;
mod raster;
mod text;

pub use self::json::{ArrayDecoder, KeyedDecoder, ObjectDecoder};
pub use self::raster::ImageDecoder;
pub use self::text::StringDecoder;

use crate::error::DecodeError;

/// Turns raw response bytes into a typed value.
pub trait BodyDecoder: Send + Sync {
    /// The domain type this decoder is bound to.
    type Parsed;
    /// What a successful decode yields.
    type Output;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Output, DecodeError>;

    fn decode_opt(&self, bytes: &[u8]) -> Option<Self::Output> {
        self.decode(bytes).ok()
    }
}
