//! Endpoint descriptions.
//!
//! A `RequestDescriptor` is plain data: where the endpoint lives, which verb
//! it uses, extra headers and a string parameter map. Method and path are
//! fixed when the descriptor is created; everything else is filled in with
//! the consuming `with_*` methods.

use std::collections::BTreeMap;

use url::Url;

use crate::http::HttpMethod;

/// What happens to `parameters` on a GET request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GetParameters {
    /// Parameters are ignored. GET requests are sent without them.
    #[default]
    Drop,
    /// Parameters are appended to the URL as a query string.
    Query,
}

/// Immutable description of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    base_url: Option<Url>,
    method: HttpMethod,
    path: String,
    headers: Vec<(String, String)>,
    parameters: BTreeMap<String, String>,
    get_parameters: GetParameters,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Append a header. Later headers with the same name win when built.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_parameters<K, V>(mut self, parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_get_parameters(mut self, policy: GetParameters) -> Self {
        self.get_parameters = policy;
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn get_parameters(&self) -> GetParameters {
        self.get_parameters
    }
}
