//! Real-time subscription callback processing.
//!
//! When a subscribed object changes, the service POSTs a JSON array of
//! change updates to the application's callback URL, signed as described in
//! [`signature`](crate::signature). The host application receives that request
//! however it likes and hands the raw body and signature header to
//! [`process`]:
//!
//! ```ignore
//! use gramlink_sdk::subscription::{self, Envelope};
//!
//! let envelope = Envelope::signed(&body, headers.get("X-Hub-Signature"));
//! subscription::process(&envelope, client_secret, Some(|handlers: &mut _| {
//!     handlers.on_user_changed(|user_id, update| {
//!         refresh_user_media(user_id, update.time())
//!     });
//! }))?;
//! ```
//!
//! Processing is a straight line: collect handlers, verify the signature,
//! parse the batch, dispatch each update in order. Updates for object types
//! without a handler are skipped. A handler that returns an error stops the
//! batch; the updates after it are not dispatched.

mod registry;
mod update;

pub use registry::HandlerRegistry;
pub use update::{ChangeUpdate, object};

use tracing::trace;

use crate::signature::{self, SignatureError};

/// Type to name when passing `None` as the registration callback.
pub type NoHandlers = fn(&mut HandlerRegistry<'_>);

/// Errors produced while processing a callback payload.
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    /// `process` was called without a registration callback.
    #[error("no handler registration supplied")]
    MissingHandlers,

    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("malformed subscription payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A registered handler failed. Later updates in the batch were not
    /// dispatched.
    #[error("{object} handler failed for {object_id}: {source}")]
    Handler {
        object: String,
        object_id: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verification<'a> {
    Skip,
    Header(Option<&'a str>),
}

/// A received callback: the raw body plus how its signature is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    payload: &'a [u8],
    verification: Verification<'a>,
}

impl<'a> Envelope<'a> {
    /// A payload whose signature must be verified.
    ///
    /// `signature` is the header value as received; `None` (header absent)
    /// fails verification just like a wrong digest does.
    pub fn signed<P>(payload: &'a P, signature: Option<&'a str>) -> Self
    where
        P: AsRef<[u8]> + ?Sized,
    {
        Self {
            payload: payload.as_ref(),
            verification: Verification::Header(signature),
        }
    }

    /// A payload processed without any signature check, e.g. one replayed
    /// from local storage after it was verified on receipt.
    pub fn unsigned<P>(payload: &'a P) -> Self
    where
        P: AsRef<[u8]> + ?Sized,
    {
        Self {
            payload: payload.as_ref(),
            verification: Verification::Skip,
        }
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.verification, Verification::Header(_))
    }

    /// Check the signature against `secret`. Always succeeds for unsigned
    /// envelopes.
    pub fn verify(&self, secret: &[u8]) -> Result<(), SignatureError> {
        match self.verification {
            Verification::Skip => Ok(()),
            Verification::Header(signature) => {
                signature::verify_signature(self.payload, signature, secret)
            }
        }
    }
}

/// Whether `signature` is the valid signature of `payload` under `secret`.
pub fn validate_update(payload: &[u8], signature: Option<&str>, secret: &[u8]) -> bool {
    signature::verify_signature(payload, signature, secret).is_ok()
}

/// Parse the batch without verifying or dispatching it.
pub fn parse_updates(payload: &[u8]) -> Result<Vec<ChangeUpdate>, serde_json::Error> {
    serde_json::from_slice(payload)
}

/// Verify, parse and dispatch one callback payload.
///
/// `register` is invoked once, before anything else, to bind handlers.
/// Passing `None` is a caller error and fails with
/// [`SubscriptionError::MissingHandlers`] without looking at the payload.
pub fn process<'h, R>(
    envelope: &Envelope<'_>,
    secret: &[u8],
    register: Option<R>,
) -> Result<(), SubscriptionError>
where
    R: FnOnce(&mut HandlerRegistry<'h>),
{
    let register = register.ok_or(SubscriptionError::MissingHandlers)?;
    let mut registry = HandlerRegistry::new();
    register(&mut registry);

    envelope.verify(secret)?;

    let updates = parse_updates(envelope.payload())?;

    for update in &updates {
        let Some(handler) = registry.handler_mut(&update.object) else {
            trace!(
                object = %update.object,
                object_id = %update.object_id,
                "no handler registered, skipping update"
            );
            continue;
        };

        handler(&update.object_id, update).map_err(|source| SubscriptionError::Handler {
            object: update.object.clone(),
            object_id: update.object_id.clone(),
            source,
        })?;
    }

    Ok(())
}
