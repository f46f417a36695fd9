//! On-disk configuration format.
//!
//! ```toml
//! client_id = "CID"
//! client_secret = "CS"
//! access_token = "AT"
//! endpoint = "https://api.instagram.com/v1/"
//! format = "json"
//! user_agent = "my-app/1.0"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use super::Format;

/// Raw TOML configuration, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub endpoint: Option<Url>,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}
