//! Subscription management types.

use serde::{Deserialize, Serialize};

/// A real-time subscription registered for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Object type, e.g. `user` or `tag`.
    pub object: String,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

/// Parameters for creating a subscription.
///
/// `aspect` defaults to `media`, the only aspect the service supports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionOptions {
    pub callback_url: Option<String>,
    pub aspect: Option<String>,
    /// Required for `tag` and `location` subscriptions.
    pub object_id: Option<String>,
    /// Echoed back by the service during the subscription handshake.
    pub verify_token: Option<String>,
    /// Centre and radius (metres) for `geography` subscriptions.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<u32>,
}

impl SubscriptionOptions {
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: Some(callback_url.into()),
            ..Self::default()
        }
    }

    pub fn object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    pub fn verify_token(mut self, token: impl Into<String>) -> Self {
        self.verify_token = Some(token.into());
        self
    }

    pub fn geography(mut self, lat: f64, lng: f64, radius: u32) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self.radius = Some(radius);
        self
    }

    /// Form parameters for `object`, in a stable order.
    pub fn to_form(&self, object: &str) -> Vec<(String, String)> {
        let mut form = vec![
            ("object".to_owned(), object.to_owned()),
            (
                "aspect".to_owned(),
                self.aspect.clone().unwrap_or_else(|| "media".to_owned()),
            ),
        ];

        let optional = [
            ("callback_url", self.callback_url.clone()),
            ("object_id", self.object_id.clone()),
            ("verify_token", self.verify_token.clone()),
            ("lat", self.lat.map(|v| v.to_string())),
            ("lng", self.lng.map(|v| v.to_string())),
            ("radius", self.radius.map(|v| v.to_string())),
        ];
        form.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| Some((key.to_owned(), value?))),
        );
        form
    }
}

/// Which subscriptions a delete call removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionSelector {
    /// A single subscription by id.
    Id(String),
    /// Every subscription for one object type.
    Object(String),
    /// Every subscription of the application.
    All,
}

impl SubscriptionSelector {
    pub fn to_query(&self) -> (String, String) {
        match self {
            SubscriptionSelector::Id(id) => ("id".to_owned(), id.clone()),
            SubscriptionSelector::Object(object) => ("object".to_owned(), object.clone()),
            SubscriptionSelector::All => ("object".to_owned(), "all".to_owned()),
        }
    }
}
