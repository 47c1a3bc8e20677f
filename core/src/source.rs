//! Data sources: one request builder, one body decoder, one fetch operation.
//!
//! # Design
//! A `DataSource` owns its parts through `Arc`s, so `get` can hand a cheap
//! clone to a spawned task and return immediately. `fetch` is the plain
//! async form that reports every failure. `get` is the callback form and
//! keeps a narrower contract:
//!
//! - transport failures and non-200 statuses are delivered as `Err`,
//! - a request that cannot be built, or a 200 body that cannot be decoded,
//!   is dropped and the callback is never invoked.
//!
//! The drop is logged at `debug` level. Callers that need to observe those
//! failures should use `fetch`.

use std::sync::Arc;

use tracing::debug;

use crate::builder::RequestBuilder;
use crate::decode::BodyDecoder;
use crate::error::FetchError;
use crate::transport::Transport;

/// The value handed to a completion callback.
pub type Outcome<T> = Result<T, FetchError>;

/// Anything that produces an `Outcome` through a completion callback.
///
/// Implemented by `DataSource` and `MockDataSource` so consumers can take
/// either.
pub trait Source {
    type Output;

    /// Invokes `callback` at most once. The callback may run on a different
    /// thread than the caller.
    fn get<F>(&self, callback: F)
    where
        F: FnOnce(Outcome<Self::Output>) + Send + 'static;
}

pub struct DataSource<B, D> {
    builder: Arc<B>,
    decoder: Arc<D>,
    transport: Arc<dyn Transport>,
}

impl<B, D> Clone for DataSource<B, D> {
    fn clone(&self) -> Self {
        Self {
            builder: Arc::clone(&self.builder),
            decoder: Arc::clone(&self.decoder),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<B, D> DataSource<B, D>
where
    B: RequestBuilder + 'static,
    D: BodyDecoder + 'static,
{
    pub fn new(builder: B, decoder: D, transport: impl Transport + 'static) -> Self {
        Self::with_shared_transport(builder, decoder, Arc::new(transport))
    }

    /// Builds a source around a transport shared with other sources.
    pub fn with_shared_transport(builder: B, decoder: D, transport: Arc<dyn Transport>) -> Self {
        Self {
            builder: Arc::new(builder),
            decoder: Arc::new(decoder),
            transport,
        }
    }

    /// Builds, sends and decodes one request. Only status 200 counts as
    /// success.
    pub async fn fetch(&self) -> Outcome<D::Output> {
        let request = self.builder.build()?;
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = self.transport.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "received response");

        if response.status != 200 {
            return Err(FetchError::BadStatusCode(response.status));
        }
        Ok(self.decoder.decode(&response.body)?)
    }

    /// Runs `fetch` on the current tokio runtime and reports through
    /// `callback`. Returns immediately.
    ///
    /// Build and decode failures are not reported; see the module docs.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn get<F>(&self, callback: F)
    where
        F: FnOnce(Outcome<D::Output>) + Send + 'static,
        D::Output: Send + 'static,
    {
        let source = self.clone();
        tokio::spawn(async move {
            match source.fetch().await {
                Err(err) if !err.is_delivered() => {
                    debug!(error = %err, "dropping outcome without invoking callback");
                }
                outcome => callback(outcome),
            }
        });
    }
}

impl<B, D> Source for DataSource<B, D>
where
    B: RequestBuilder + 'static,
    D: BodyDecoder + 'static,
    D::Output: Send + 'static,
{
    type Output = D::Output;

    fn get<F>(&self, callback: F)
    where
        F: FnOnce(Outcome<Self::Output>) + Send + 'static,
    {
        DataSource::get(self, callback)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use url::Url;

    use super::*;
    use crate::decode::StringDecoder;
    use crate::descriptor::RequestDescriptor;
    use crate::error::{BuildError, DecodeError, TransportError};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Records every request and answers with a fixed status and body.
    struct Recording {
        status: u16,
        body: Vec<u8>,
        seen: Mutex<Vec<HttpRequest>>,
        calls: AtomicUsize,
    }

    impl Recording {
        fn new(status: u16, body: &[u8]) -> Self {
            Self {
                status,
                body: body.to_vec(),
                seen: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse::new(self.status, self.body.clone()))
        }
    }

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::post("/echo")
            .with_base_url(Url::parse("http://localhost:3000").unwrap())
            .with_header("x-client", "tests")
            .with_parameter("a", "1")
    }

    #[tokio::test]
    async fn fetch_passes_built_request_to_transport() {
        let transport = Arc::new(Recording::new(200, b"ok"));
        let source = DataSource::with_shared_transport(descriptor(), StringDecoder, transport.clone());

        assert_eq!(source.fetch().await.unwrap(), "ok");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].url.as_str(), "http://localhost:3000/echo");
        assert_eq!(seen[0].header("x-client"), Some("tests"));
        assert_eq!(seen[0].body.as_deref(), Some(&br#"{"a":"1"}"#[..]));
    }

    #[tokio::test]
    async fn fetch_reports_build_failure_without_touching_transport() {
        let transport = Arc::new(Recording::new(200, b"ok"));
        let source = DataSource::with_shared_transport(
            RequestDescriptor::get("/x"),
            StringDecoder,
            transport.clone(),
        );

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Build(BuildError::MissingBaseUrl)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_treats_only_200_as_success() {
        for status in [201, 204, 301, 500] {
            let source = DataSource::new(descriptor(), StringDecoder, Recording::new(status, b"ok"));
            let err = source.fetch().await.unwrap_err();
            assert!(matches!(err, FetchError::BadStatusCode(s) if s == status));
        }
    }

    #[tokio::test]
    async fn fetch_reports_decode_failure() {
        let source = DataSource::new(descriptor(), StringDecoder, Recording::new(200, &[0xff, 0xfe]));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(DecodeError::Utf8(_))));
    }

    #[tokio::test]
    async fn clones_share_parts() {
        let source = DataSource::new(descriptor(), StringDecoder, Recording::new(200, b"ok"));
        let copy = source.clone();
        assert!(Arc::ptr_eq(&source.builder, &copy.builder));
        assert!(Arc::ptr_eq(&source.decoder, &copy.decoder));
        assert!(Arc::ptr_eq(&source.transport, &copy.transport));
    }
}
