//! Composable data sources over HTTP.
//!
//! # Overview
//! An endpoint is described once as a `RequestDescriptor`, paired with a
//! `BodyDecoder` for its response, and exposed as a `DataSource` with a
//! single asynchronous fetch operation. The network is reached through a
//! `Transport`; `MockDataSource` replaces it with a static payload.
//!
//! # Design
//! - Composition, not inheritance: a `DataSource` holds one `RequestBuilder`,
//!   one `BodyDecoder` and one `Transport`.
//! - Decoders are generic over the parsed type, so a source's output type is
//!   fixed at compile time.
//! - Every fallible step returns its own error type. `DataSource::fetch`
//!   surfaces all of them; the callback-based `get` delivers only transport
//!   and status failures.
//!
//! ```no_run
//! # #[cfg(feature = "reqwest")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use datasource_core::{DataSource, ReqwestTransport, RequestDescriptor, StringDecoder};
//! use url::Url;
//!
//! let greeting = RequestDescriptor::get("/greeting")
//!     .with_base_url(Url::parse("http://localhost:3000")?);
//! let source = DataSource::new(greeting, StringDecoder, ReqwestTransport::new());
//! println!("{}", source.fetch().await?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod construct;
pub mod decode;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod mock;
pub mod source;
pub mod transport;

pub use builder::RequestBuilder;
pub use construct::{FromJson, FromJsonKeyed};
pub use decode::{ArrayDecoder, BodyDecoder, ImageDecoder, KeyedDecoder, ObjectDecoder, StringDecoder};
pub use descriptor::{GetParameters, RequestDescriptor};
pub use error::{BuildError, DecodeError, FetchError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mock::{MockDataSource, MockPayload};
pub use source::{DataSource, Outcome, Source};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
