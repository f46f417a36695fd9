//! Change-update records as they appear in a callback payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Object types the service currently documents.
///
/// The set is open: the service may introduce new types at any time, so
/// dispatch is keyed by the raw string.
pub mod object {
    pub const USER: &str = "user";
    pub const TAG: &str = "tag";
    pub const LOCATION: &str = "location";
    pub const GEOGRAPHY: &str = "geography";
}

/// One entry of a real-time update batch.
///
/// ```json
/// {
///     "subscription_id": "1",
///     "object": "user",
///     "object_id": "1234",
///     "changed_aspect": "media",
///     "time": 1297286541
/// }
/// ```
///
/// Only `object` and `object_id` are required. Every other field is kept in
/// [`data`](Self::data) exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeUpdate {
    pub object: String,
    pub object_id: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ChangeUpdate {
    /// Raw access to any field other than `object` and `object_id`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// The aspect that changed, usually `media`.
    pub fn changed_aspect(&self) -> Option<&str> {
        self.get("changed_aspect").and_then(Value::as_str)
    }

    /// Identifier of the subscription that produced this update.
    ///
    /// The service has sent this both as a number and as a string.
    pub fn subscription_id(&self) -> Option<String> {
        match self.get("subscription_id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Unix timestamp of the change.
    pub fn time(&self) -> Option<i64> {
        self.get("time").and_then(Value::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields_and_passthrough() {
        let update: ChangeUpdate = serde_json::from_str(
            r#"{"changed_aspect": "media", "subscription_id": 42, "object": "geography",
                "object_id": "303", "time": 1297286541, "data": {"media_id": "99"}}"#,
        )
        .unwrap();

        assert_eq!(update.object, object::GEOGRAPHY);
        assert_eq!(update.object_id, "303");
        assert_eq!(update.changed_aspect(), Some("media"));
        assert_eq!(update.subscription_id().as_deref(), Some("42"));
        assert_eq!(update.time(), Some(1297286541));
        assert_eq!(update.get("data").unwrap()["media_id"], "99");
        assert!(!update.data.contains_key("object"));
    }

    #[test]
    fn test_requires_object_and_id() {
        assert!(serde_json::from_str::<ChangeUpdate>(r#"{"object": "user"}"#).is_err());
        assert!(serde_json::from_str::<ChangeUpdate>(r#"{"object_id": "1"}"#).is_err());
    }
}
