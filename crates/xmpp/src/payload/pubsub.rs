//! Publish-subscribe payloads (XEP-0060), limited to the subscription
//! surface: the `<pubsub/>` wrapper, `<subscription/>` state, and the
//! `<subscribe-options/>` marker.
//!
//! ## XML Format
//!
//! ```xml
//! <pubsub xmlns='http://jabber.org/protocol/pubsub'>
//!   <subscription node='princely-musings'
//!                 jid='francisco@denmark.example'
//!                 subid='ba49252aaa4f5d320c24d3766f0bdcade78c78d3'
//!                 subscription='unconfigured'>
//!     <subscribe-options><required/></subscribe-options>
//!   </subscription>
//! </pubsub>
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::jid::Jid;
use crate::ns;
use crate::parser::{DelegatingParser, ParserRegistry, PayloadParser};
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

/// `<pubsub/>` wrapper around a single inner payload. When the wrapper
/// carries several children, the last recognized one wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PubSub {
    pub payload: Option<Box<Payload>>,
}

impl PubSub {
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("pubsub", ns::PUBSUB);
        if let Some(payload) = &self.payload {
            element.append_child(payload.to_element());
        }
        element
    }
}

/// Subscription state reported by the service.
///
/// `None` is both the "no subscription" state and the fallback for a
/// missing or unknown attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PubSubSubscriptionState {
    #[default]
    None,
    Pending,
    Subscribed,
    Unconfigured,
}

impl PubSubSubscriptionState {
    pub fn from_token(token: &str) -> Self {
        match token {
            "pending" => Self::Pending,
            "subscribed" => Self::Subscribed,
            "unconfigured" => Self::Unconfigured,
            _ => Self::None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Subscribed => "subscribed",
            Self::Unconfigured => "unconfigured",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PubSubSubscription {
    pub node: Option<String>,
    pub jid: Option<Jid>,
    pub subscription_id: Option<String>,
    pub state: PubSubSubscriptionState,
    pub options: Option<PubSubSubscribeOptions>,
}

impl PubSubSubscription {
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("subscription", ns::PUBSUB);
        if let Some(node) = &self.node {
            element.set_attr("node", node);
        }
        if let Some(jid) = &self.jid {
            element.set_attr("jid", &jid.to_string());
        }
        if let Some(subscription_id) = &self.subscription_id {
            element.set_attr("subid", subscription_id);
        }
        element.set_attr("subscription", self.state.token());
        if let Some(options) = &self.options {
            element.append_child(options.to_element());
        }
        element
    }
}

/// `<subscribe-options/>`, whose only content of interest is whether the
/// service marked configuration as `<required/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PubSubSubscribeOptions {
    pub required: bool,
}

impl PubSubSubscribeOptions {
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("subscribe-options", ns::PUBSUB);
        if self.required {
            element.append_child(Element::new("required", ns::PUBSUB));
        }
        element
    }
}

pub struct PubSubParser {
    delegate: DelegatingParser,
    payload: Option<Box<Payload>>,
}

impl PubSubParser {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            delegate: DelegatingParser::new(registry),
            payload: None,
        }
    }
}

impl PayloadParser for PubSubParser {
    fn handle_start(&mut self, name: &str, namespace: &str, attributes: &AttributeList) {
        self.delegate.handle_start(name, namespace, attributes);
    }

    fn handle_end(&mut self, name: &str, namespace: &str) {
        if let Some(closed) = self.delegate.handle_end(name, namespace) {
            if let Some(payload) = closed.payload {
                self.payload = Some(Box::new(payload));
            }
        }
    }

    fn handle_text(&mut self, text: &str) {
        self.delegate.handle_text(text);
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::PubSub(PubSub {
            payload: self.payload,
        })
    }
}

pub struct PubSubSubscriptionParser {
    delegate: DelegatingParser,
    subscription: PubSubSubscription,
}

impl PubSubSubscriptionParser {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            delegate: DelegatingParser::new(registry),
            subscription: PubSubSubscription::default(),
        }
    }
}

impl PayloadParser for PubSubSubscriptionParser {
    fn handle_start(&mut self, name: &str, namespace: &str, attributes: &AttributeList) {
        if self.delegate.depth() == 0 {
            self.subscription.node = attributes.get("node").map(str::to_owned);
            self.subscription.jid = attributes.get("jid").and_then(|value| value.parse().ok());
            self.subscription.subscription_id = attributes.get("subid").map(str::to_owned);
            self.subscription.state =
                PubSubSubscriptionState::from_token(attributes.get("subscription").unwrap_or(""));
        }
        self.delegate.handle_start(name, namespace, attributes);
    }

    fn handle_end(&mut self, name: &str, namespace: &str) {
        if let Some(closed) = self.delegate.handle_end(name, namespace) {
            if let Some(Payload::PubSubSubscribeOptions(options)) = closed.payload {
                self.subscription.options = Some(options);
            }
        }
    }

    fn handle_text(&mut self, text: &str) {
        self.delegate.handle_text(text);
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::PubSubSubscription(self.subscription)
    }
}

pub struct PubSubSubscribeOptionsParser {
    delegate: DelegatingParser,
    options: PubSubSubscribeOptions,
}

impl PubSubSubscribeOptionsParser {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            delegate: DelegatingParser::new(registry),
            options: PubSubSubscribeOptions::default(),
        }
    }
}

impl PayloadParser for PubSubSubscribeOptionsParser {
    fn handle_start(&mut self, name: &str, namespace: &str, attributes: &AttributeList) {
        self.delegate.handle_start(name, namespace, attributes);
    }

    fn handle_end(&mut self, name: &str, namespace: &str) {
        // The marker has no parser of its own; the closing tag identifies it.
        if let Some(closed) = self.delegate.handle_end(name, namespace) {
            if closed.name == "required" {
                self.options.required = true;
            }
        }
    }

    fn handle_text(&mut self, text: &str) {
        self.delegate.handle_text(text);
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::PubSubSubscribeOptions(self.options)
    }
}
