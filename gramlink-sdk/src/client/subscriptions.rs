//! Real-time subscription endpoints and callback processing.
//!
//! The management endpoints authenticate as the application (`client_id` +
//! `client_secret`), never with a user access token.

use super::{Client, ClientError};
use crate::objects::{Subscription, SubscriptionOptions, SubscriptionSelector};
use crate::subscription::{self, Envelope, HandlerRegistry, SubscriptionError};
use crate::transport::{HttpMethod, RequestExecutor};

const SUBSCRIPTIONS: &str = "subscriptions";

impl<E> Client<E>
where
    E: RequestExecutor<Error = ClientError>,
{
    /// `GET /subscriptions` – list the application's subscriptions.
    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, ClientError> {
        let request = self.app_request(HttpMethod::Get, SUBSCRIPTIONS)?;
        self.send_for_data(request).await
    }

    /// `POST /subscriptions` – subscribe to changes of `object` (`user`,
    /// `tag`, `location` or `geography`).
    pub async fn create_subscription(
        &self,
        object: &str,
        options: &SubscriptionOptions,
    ) -> Result<Subscription, ClientError> {
        let mut request = self.app_request(HttpMethod::Post, SUBSCRIPTIONS)?;
        request.form = options.to_form(object);
        self.send_for_data(request).await
    }

    /// `DELETE /subscriptions` – remove one, some, or all subscriptions.
    pub async fn delete_subscription(
        &self,
        selector: &SubscriptionSelector,
    ) -> Result<(), ClientError> {
        let (key, value) = selector.to_query();
        let request = self
            .app_request(HttpMethod::Delete, SUBSCRIPTIONS)?
            .query(key, value);
        self.send(request).await?;
        Ok(())
    }

    /// Whether `signature` authenticates `payload` for this application.
    pub fn validate_update(&self, payload: &[u8], signature: Option<&str>) -> bool {
        subscription::validate_update(payload, signature, self.config.secret_bytes())
    }

    /// Verify and dispatch a callback payload using the configured client
    /// secret. See [`subscription::process`].
    pub fn process_subscription<'h, R>(
        &self,
        envelope: &Envelope<'_>,
        register: Option<R>,
    ) -> Result<(), SubscriptionError>
    where
        R: FnOnce(&mut HandlerRegistry<'h>),
    {
        subscription::process(envelope, self.config.secret_bytes(), register)
    }
}
