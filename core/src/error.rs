//! Error types for building, transporting and decoding requests.
//!
//! # Design
//! Every fallible step has its own error type so callers of
//! `DataSource::fetch` can tell a malformed body from a missing base URL.
//! `FetchError` is the union delivered through an `Outcome`. Transport
//! failures stay opaque: the core never inspects them.

use std::error::Error as StdError;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Why a `RequestBuilder` could not produce an `HttpRequest`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("request descriptor has no base URL")]
    MissingBaseUrl,

    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to serialize request parameters")]
    Serialize(#[from] serde_json::Error),
}

/// Why a `BodyDecoder` could not produce a value from a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),

    #[error("body is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array")]
    NotAnArray,

    #[error("JSON value could not be constructed into {0}")]
    Construct(&'static str),

    #[error("body is not a supported image")]
    Image(#[from] image::ImageError),
}

/// An opaque failure reported by a `Transport`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Failure branch of an `Outcome`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with anything other than 200.
    #[error("unexpected status code {0}")]
    BadStatusCode(u16),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FetchError {
    /// Whether `DataSource::get` delivers this failure to its callback.
    ///
    /// Build and decode failures are not delivered; only `fetch` reports them.
    pub fn is_delivered(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::BadStatusCode(_))
    }
}
