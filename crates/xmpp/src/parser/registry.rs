//! Runtime mapping from element name and namespace to payload parsers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::delay::DelayParser;
use crate::payload::message::BodyParser;
use crate::payload::ping::PingParser;
use crate::payload::presence::{PriorityParser, ShowParser, StatusParser};
use crate::payload::pubsub::{
    PubSubParser, PubSubSubscribeOptionsParser, PubSubSubscriptionParser,
};
use crate::payload::rosterx::RosterItemExchangeParser;
use crate::payload::vcard::VCardParser;

/// Builds a fresh parser. The registry hands itself to the factory so
/// parsers for composite payloads can delegate to it in turn.
pub type ParserFactory = Box<dyn Fn(&Arc<ParserRegistry>) -> Box<dyn PayloadParser> + Send + Sync>;

/// Lookup table keyed by `(element name, namespace)`.
///
/// Registration happens before the registry is shared; afterwards it is
/// read-only and any number of parsers can draw from it concurrently.
#[derive(Default)]
pub struct ParserRegistry {
    factories: HashMap<(String, String), ParserFactory>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every payload this crate understands.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("body", ns::JABBER_CLIENT, |_| Box::new(BodyParser::new()));
        registry.register("status", ns::JABBER_CLIENT, |_| Box::new(StatusParser::new()));
        registry.register("show", ns::JABBER_CLIENT, |_| Box::new(ShowParser::new()));
        registry.register("priority", ns::JABBER_CLIENT, |_| {
            Box::new(PriorityParser::new())
        });
        registry.register("delay", ns::DELAY, |_| Box::new(DelayParser::new()));
        registry.register("ping", ns::PING, |_| Box::new(PingParser::new()));
        registry.register("x", ns::ROSTER_EXCHANGE, |_| {
            Box::new(RosterItemExchangeParser::new())
        });
        registry.register("pubsub", ns::PUBSUB, |registry| {
            Box::new(PubSubParser::new(Arc::clone(registry)))
        });
        registry.register("subscription", ns::PUBSUB, |registry| {
            Box::new(PubSubSubscriptionParser::new(Arc::clone(registry)))
        });
        registry.register("subscribe-options", ns::PUBSUB, |registry| {
            Box::new(PubSubSubscribeOptionsParser::new(Arc::clone(registry)))
        });
        registry.register("vCard", ns::VCARD_TEMP, |_| Box::new(VCardParser::new()));
        registry
    }

    /// Registers a factory for an element. A later registration for the
    /// same key replaces the earlier one; the return value reports whether
    /// that happened so callers can log the replacement.
    pub fn register<F>(&mut self, name: &str, namespace: &str, factory: F) -> bool
    where
        F: Fn(&Arc<ParserRegistry>) -> Box<dyn PayloadParser> + Send + Sync + 'static,
    {
        let replaced = self
            .factories
            .insert(
                (name.to_owned(), namespace.to_owned()),
                Box::new(factory),
            )
            .is_some();
        trace!(element = %name, namespace = %namespace, replaced, "registered payload parser");
        replaced
    }

    pub fn contains(&self, name: &str, namespace: &str) -> bool {
        self.factories
            .contains_key(&(name.to_owned(), namespace.to_owned()))
    }

    /// Builds a parser for the element, or `None` when nothing is
    /// registered for it. Takes the shared handle so the chosen factory can
    /// hand the registry on to nested parsers.
    pub fn create(
        registry: &Arc<ParserRegistry>,
        name: &str,
        namespace: &str,
    ) -> Option<Box<dyn PayloadParser>> {
        let factory = registry
            .factories
            .get(&(name.to_owned(), namespace.to_owned()))?;
        Some(factory(registry))
    }
}
