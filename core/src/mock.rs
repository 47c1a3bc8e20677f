//! Offline stand-in for `DataSource`.
//!
//! `MockDataSource` skips the network and feeds a static payload through the
//! same decoder a real source would use. The callback runs before `get`
//! returns, on the calling thread, which makes it suitable for tests and
//! previews.

use tracing::debug;

use crate::decode::BodyDecoder;
use crate::source::{Outcome, Source};

/// A canonical example response for a parsed type.
pub trait MockPayload {
    const MOCK_PAYLOAD: &'static [u8];
}

#[derive(Debug, Clone)]
pub struct MockDataSource<D> {
    decoder: D,
    payload: &'static [u8],
}

impl<D: BodyDecoder> MockDataSource<D> {
    /// Uses the parsed type's own mock payload.
    pub fn new(decoder: D) -> Self
    where
        D::Parsed: MockPayload,
    {
        Self::with_payload(decoder, <D::Parsed as MockPayload>::MOCK_PAYLOAD)
    }

    pub fn with_payload(decoder: D, payload: &'static [u8]) -> Self {
        Self { decoder, payload }
    }

    pub fn payload(&self) -> &'static [u8] {
        self.payload
    }

    pub async fn fetch(&self) -> Outcome<D::Output> {
        Ok(self.decoder.decode(self.payload)?)
    }

    /// Decodes the payload and invokes `callback` before returning. If the
    /// payload does not decode the callback is not invoked.
    pub fn get<F>(&self, callback: F)
    where
        F: FnOnce(Outcome<D::Output>),
    {
        match self.decoder.decode(self.payload) {
            Ok(value) => callback(Ok(value)),
            Err(err) => debug!(error = %err, "mock payload did not decode; callback not invoked"),
        }
    }
}

impl<D: BodyDecoder> Source for MockDataSource<D> {
    type Output = D::Output;

    fn get<F>(&self, callback: F)
    where
        F: FnOnce(Outcome<Self::Output>) + Send + 'static,
    {
        MockDataSource::get(self, callback)
    }
}
