//! Typed stanza payloads and their streaming parsers.
//!
//! Each submodule pairs a payload type with the parser that builds it from
//! element events. Parsers are registered by element name and namespace in
//! [`crate::parser::ParserRegistry`]; anything unregistered is skipped by
//! the stanza parser without error.

pub mod delay;
pub mod message;
pub mod ping;
pub mod presence;
pub mod pubsub;
pub mod rosterx;
pub mod vcard;

use crate::xml::Element;

pub use delay::Delay;
pub use message::Body;
pub use presence::{ShowKind, Status};
pub use pubsub::{PubSub, PubSubSubscribeOptions, PubSubSubscription, PubSubSubscriptionState};
pub use rosterx::{RosterExchangeAction, RosterExchangeItem, RosterItemExchange};
pub use vcard::VCard;

/// A single typed child of a stanza.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Body(Body),
    Status(Status),
    Show(ShowKind),
    Priority(i32),
    Delay(Delay),
    Ping,
    RosterItemExchange(RosterItemExchange),
    PubSub(PubSub),
    PubSubSubscription(PubSubSubscription),
    PubSubSubscribeOptions(PubSubSubscribeOptions),
    VCard(VCard),
}

impl Payload {
    pub fn to_element(&self) -> Element {
        match self {
            Self::Body(body) => body.to_element(),
            Self::Status(status) => status.to_element(),
            Self::Show(show) => presence::show_element(*show),
            Self::Priority(priority) => presence::priority_element(*priority),
            Self::Delay(delay) => delay.to_element(),
            Self::Ping => ping::ping_element(),
            Self::RosterItemExchange(exchange) => exchange.to_element(),
            Self::PubSub(pubsub) => pubsub.to_element(),
            Self::PubSubSubscription(subscription) => subscription.to_element(),
            Self::PubSubSubscribeOptions(options) => options.to_element(),
            Self::VCard(vcard) => vcard.to_element(),
        }
    }
}
