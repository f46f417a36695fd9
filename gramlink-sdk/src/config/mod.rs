//! Client configuration.
//!
//! A [`ClientConfig`] is either built in code or loaded from a TOML file
//! (see [`file`] for the format). Both paths end in
//! [`ClientConfig::validate`].

pub mod file;
mod format;

pub use file::FileConfig;
pub use format::Format;

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API root. Endpoint paths are joined onto it, so it must end in `/`.
pub const DEFAULT_ENDPOINT: &str = "https://api.instagram.com/v1/";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("gramlink-sdk/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Validated configuration shared by every request a client makes.
#[derive(Clone)]
pub struct ClientConfig {
    pub client_id: String,
    client_secret: String,
    pub access_token: Option<String>,
    pub endpoint: Url,
    pub format: Format,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with default endpoint, format and user agent.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: None,
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            format: Format::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        Self::try_from(file)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The client secret as HMAC key bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.client_secret.as_bytes()
    }

    /// Resolve an endpoint path such as `subscriptions` to a full URL with the
    /// configured format extension.
    pub fn resource_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let path = path.trim_start_matches('/');
        self.endpoint
            .join(&format!("{path}.{}", self.format.extension()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "client_id must not be empty".to_owned(),
            ));
        }
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "endpoint {} must use http or https",
                self.endpoint
            )));
        }
        // Visible ASCII and tab only, the same rule HTTP header values follow.
        let header_safe = |b: u8| b == b'\t' || (b' '..=b'~').contains(&b);
        if !self.user_agent.bytes().all(header_safe) {
            return Err(ConfigError::ValidationError(format!(
                "user_agent {:?} is not a valid header value",
                self.user_agent
            )));
        }
        // Url::join replaces the last segment unless the base ends in '/'.
        if !self.endpoint.path().ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "endpoint {} must end with '/'",
                self.endpoint
            )));
        }
        Ok(())
    }
}

impl TryFrom<FileConfig> for ClientConfig {
    type Error = ConfigError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        let mut config = ClientConfig::new(file.client_id, file.client_secret)?;
        config.access_token = file.access_token;
        config.format = file.format;
        config.timeout = file.timeout_secs.map(Duration::from_secs);
        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }
        config.validate()?;
        Ok(config)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint.as_str())
            .field("format", &self.format)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let config = ClientConfig::from_toml_str(
            r#"
client_id = "CID"
client_secret = "CS"
access_token = "AT"
endpoint = "http://localhost:8080/v1/"
format = "json"
user_agent = "test-agent"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.client_id, "CID");
        assert_eq!(config.secret_bytes(), b"CS");
        assert_eq!(config.access_token.as_deref(), Some("AT"));
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/v1/");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_defaults() {
        let config =
            ClientConfig::from_toml_str("client_id = \"CID\"\nclient_secret = \"CS\"").unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_validation() {
        let err =
            ClientConfig::from_toml_str("client_id = \" \"\nclient_secret = \"CS\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ClientConfig::from_toml_str(
            "client_id = \"CID\"\nclient_secret = \"CS\"\nendpoint = \"https://api.example.com/v1\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ClientConfig::from_toml_str("client_id = \"CID\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_user_agent_must_be_header_safe() {
        let err = ClientConfig::from_toml_str(
            "client_id = \"CID\"\nclient_secret = \"CS\"\nuser_agent = \"bad\\nagent\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let config = ClientConfig::new("CID", "CS")
            .unwrap()
            .with_user_agent("caf\u{e9}/1.0");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = ClientConfig::new("CID", "CS")
            .unwrap()
            .with_user_agent("my-app/1.0 (+https://example.com)");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resource_url() {
        let config = ClientConfig::new("CID", "CS").unwrap();
        assert_eq!(
            config.resource_url("subscriptions").unwrap().as_str(),
            "https://api.instagram.com/v1/subscriptions.json"
        );
        assert_eq!(
            config.resource_url("/users/self/feed").unwrap().as_str(),
            "https://api.instagram.com/v1/users/self/feed.json"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::new("CID", "super-secret")
            .unwrap()
            .with_access_token("token-value");
        let debug = format!("{config:?}");
        assert!(debug.contains("CID"));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("token-value"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("/nonexistent/gramlink.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
