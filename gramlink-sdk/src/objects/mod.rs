//! Response and request types of the REST API.

pub mod subscription;

pub use subscription::{Subscription, SubscriptionOptions, SubscriptionSelector};

use serde::{Deserialize, Serialize};

/// The `meta` block every v1 response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Standard `{"meta": ..., "data": ...}` response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub meta: Meta,
    pub data: T,
}
