//! The seam between the SDK and whatever performs HTTP.
//!
//! Endpoint methods describe a call as an [`ApiRequest`]; a
//! [`RequestExecutor`] performs it and hands back the completed [`Exchange`].
//! Nothing in this module does I/O itself.

use bytes::Bytes;
use url::Url;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound API call, described independently of any HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Query-string parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// `application/x-www-form-urlencoded` body parameters. Empty means no body.
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Append a query-string parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a form body parameter.
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }
}

/// One completed request/response pair.
///
/// Transports must populate every field for failed responses too, since the
/// classifier needs the method, URL and body to build its error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Request method, e.g. `GET`.
    pub method: String,
    /// Final request URL including the query string.
    pub url: String,
    pub status: u16,
    /// Raw response body. `None` when the transport did not capture one.
    pub body: Option<Bytes>,
}

impl Exchange {
    pub fn new(method: impl Into<String>, url: impl Into<String>, status: u16) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            status,
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Deserialize the response body. An absent body is treated as empty.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default())
    }
}

/// Performs [`ApiRequest`]s.
///
/// Implementations own connection pooling, TLS, timeouts and any retry policy;
/// the SDK only needs the completed [`Exchange`].
#[async_trait::async_trait]
pub trait RequestExecutor: Send + Sync {
    type Error: Send;

    async fn execute(&self, request: ApiRequest) -> Result<Exchange, Self::Error>;
}
