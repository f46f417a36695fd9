//! Client SDK for the photo-sharing REST API.
//!
//! The crate has two halves:
//!
//! * [`classifier`] turns completed HTTP exchanges into typed
//!   [`ServiceError`]s and wraps any [`RequestExecutor`] so every call made
//!   through it is checked.
//! * [`subscription`] authenticates and dispatches the real-time update
//!   batches the service pushes to a subscription callback URL.
//!
//! The reqwest-backed [`client`] is gated behind the `client` cargo feature
//! (enabled by default) so hosts that only process subscription callbacks can
//! opt out of the HTTP stack.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod objects;
pub mod signature;
pub mod subscription;
pub mod transport;

#[cfg(feature = "client")]
pub mod client;

pub use classifier::{RaiseHttpError, classify};
pub use error::ServiceError;
pub use signature::SignatureError;
pub use subscription::{ChangeUpdate, Envelope, HandlerRegistry, SubscriptionError};
pub use transport::{ApiRequest, Exchange, HttpMethod, RequestExecutor};
