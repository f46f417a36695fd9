//! HTTP client for the REST API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need subscription processing do not pull in `reqwest`.
//!
//! Every request goes through [`RaiseHttpError`], so failing statuses come
//! back as [`ClientError::Service`] carrying the classified
//! [`ServiceError`].

mod subscriptions;
mod transport;

pub use transport::ReqwestExecutor;

use crate::classifier::RaiseHttpError;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ServiceError;
use crate::objects::ApiResponse;
use crate::transport::{ApiRequest, Exchange, HttpMethod, RequestExecutor};

/// Errors produced by [`Client`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status the classifier maps to an error.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint could not be joined with the resource path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The classified service error, if this is one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            ClientError::Service(err) => Some(err),
            _ => None,
        }
    }
}

/// Typed client for the REST API.
///
/// Generic over the [`RequestExecutor`] so tests and hosts with their own
/// HTTP stack can plug in a different transport; the default is
/// [`ReqwestExecutor`].
#[derive(Debug, Clone)]
pub struct Client<E = ReqwestExecutor> {
    config: ClientConfig,
    executor: RaiseHttpError<E>,
}

impl Client<ReqwestExecutor> {
    /// Create a client backed by `reqwest`, honouring the configured user
    /// agent and timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let executor = ReqwestExecutor::from_config(&config)?;
        Self::with_executor(config, executor)
    }
}

impl<E> Client<E>
where
    E: RequestExecutor<Error = ClientError>,
{
    pub fn with_executor(config: ClientConfig, executor: E) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            config,
            executor: RaiseHttpError::new(executor),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        self.executor.inner()
    }

    /// A request authenticated as the application rather than a user:
    /// `client_id` and `client_secret` go in the query string.
    fn app_request(&self, method: HttpMethod, path: &str) -> Result<ApiRequest, ClientError> {
        let url = self.config.resource_url(path)?;
        Ok(ApiRequest::new(method, url)
            .query("client_id", self.config.client_id.as_str())
            .query("client_secret", self.config.client_secret()))
    }

    async fn send(&self, request: ApiRequest) -> Result<Exchange, ClientError> {
        self.executor.execute(request).await
    }

    async fn send_for_data<T>(&self, request: ApiRequest) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let exchange = self.send(request).await?;
        let response: ApiResponse<T> = exchange.json()?;
        Ok(response.data)
    }
}
