//! The seam between the core and whatever performs HTTP I/O.
//!
//! The core never talks to the network itself. A `Transport` takes a built
//! `HttpRequest` and answers with either an `HttpResponse` or an opaque
//! `TransportError`. Timeouts, pooling and TLS belong to the implementation.

#[cfg(feature = "reqwest")]
mod reqwest_transport;

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
