//! `reqwest`-backed [`RequestExecutor`].

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use super::ClientError;
use crate::config::{ClientConfig, ConfigError};
use crate::transport::{ApiRequest, Exchange, HttpMethod, RequestExecutor};

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Executes requests with a `reqwest::Client`.
///
/// The response body is always read, whatever the status, so the classifier
/// can extract the API's error message.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    http: reqwest::Client,
}

impl ReqwestExecutor {
    /// Wrap an existing `reqwest::Client` (e.g. one with a proxy configured).
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a `reqwest::Client` with the configured user agent and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            ConfigError::ValidationError(format!(
                "user_agent {:?} is not a valid header value",
                config.user_agent
            ))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }
}

#[async_trait::async_trait]
impl RequestExecutor for ReqwestExecutor {
    type Error = ClientError;

    async fn execute(&self, request: ApiRequest) -> Result<Exchange, ClientError> {
        let ApiRequest {
            method,
            url,
            query,
            form,
        } = request;

        let mut builder = self.http.request(method.into(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if !form.is_empty() {
            builder = builder.form(&form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        // The query string may carry credentials; log the path only.
        debug!(method = %method, path = response.url().path(), status, "API request completed");
        let body = response.bytes().await?;

        Ok(Exchange {
            method: method.as_str().to_owned(),
            url,
            status,
            body: Some(body),
        })
    }
}
