//! Per-call mapping from object type to callback.

use std::collections::HashMap;

use super::update::{ChangeUpdate, object};

type Handler<'h> = Box<dyn FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h>;

/// Handlers collected by the registration callback of
/// [`process`](super::process).
///
/// A registry lives for exactly one `process` call. Registering a second
/// handler for the same object type replaces the first.
#[derive(Default)]
pub struct HandlerRegistry<'h> {
    handlers: HashMap<String, Handler<'h>>,
}

impl<'h> HandlerRegistry<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for updates whose `object` equals `object_type`.
    ///
    /// The handler receives the update's `object_id` and the full record.
    pub fn on<F>(&mut self, object_type: impl Into<String>, handler: F) -> &mut Self
    where
        F: FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h,
    {
        self.handlers.insert(object_type.into(), Box::new(handler));
        self
    }

    /// Called with the user id.
    pub fn on_user_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h,
    {
        self.on(object::USER, handler)
    }

    /// Called with the tag name.
    pub fn on_tag_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h,
    {
        self.on(object::TAG, handler)
    }

    /// Called with the location id.
    pub fn on_location_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h,
    {
        self.on(object::LOCATION, handler)
    }

    /// Called with the geography id.
    pub fn on_geography_changed<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str, &ChangeUpdate) -> anyhow::Result<()> + 'h,
    {
        self.on(object::GEOGRAPHY, handler)
    }

    pub fn is_registered(&self, object_type: &str) -> bool {
        self.handlers.contains_key(object_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(super) fn handler_mut(&mut self, object_type: &str) -> Option<&mut Handler<'h>> {
        self.handlers.get_mut(object_type)
    }
}

impl std::fmt::Debug for HandlerRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
