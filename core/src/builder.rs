//! Turning endpoint descriptions into transport-ready requests.
//!
//! # Design
//! `RequestBuilder` is the request half of a `DataSource`. The stock
//! implementation lives on `RequestDescriptor`; endpoint types that need
//! something else (signed URLs, computed paths) implement the trait
//! themselves. Building is pure: no I/O, no shared state, and a fresh
//! `HttpRequest` on every call.
//!
//! The URL is the base URL with the descriptor path appended verbatim to the
//! base path. A host-only base has an empty base path, even though `Url`
//! reports it as `/`, so `https://host` joined with `/posts` yields
//! `https://host/posts`. Slashes are not otherwise normalized:
//! `https://host/api/` joined with `/posts` yields `https://host/api//posts`.

use crate::descriptor::{GetParameters, RequestDescriptor};
use crate::error::BuildError;
use crate::http::{HttpMethod, HttpRequest};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Produces the request half of a data source.
pub trait RequestBuilder: Send + Sync {
    fn build(&self) -> Result<HttpRequest, BuildError>;
}

impl RequestBuilder for RequestDescriptor {
    fn build(&self) -> Result<HttpRequest, BuildError> {
        let base = self.base_url().ok_or(BuildError::MissingBaseUrl)?;
        if base.cannot_be_a_base() {
            return Err(BuildError::InvalidBaseUrl(base.to_string()));
        }

        let base_path = match base.path() {
            "/" => "",
            path => path,
        };
        let mut url = base.clone();
        url.set_path(&format!("{base_path}{}", self.path()));

        let mut request = HttpRequest {
            method: self.method(),
            url,
            headers: Vec::new(),
            body: None,
        };

        match self.method() {
            HttpMethod::Get => {
                if self.get_parameters() == GetParameters::Query && !self.parameters().is_empty() {
                    request.url.query_pairs_mut().extend_pairs(self.parameters());
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete => {
                request.body = Some(serde_json::to_vec(self.parameters())?);
                request.set_header("content-type", JSON_CONTENT_TYPE);
            }
        }

        // Descriptor headers go last so they override the content type.
        for (name, value) in self.headers() {
            request.set_header(name, value);
        }

        Ok(request)
    }
}
