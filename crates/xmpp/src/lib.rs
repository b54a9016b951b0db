//! # rookery-xmpp
//!
//! Streaming XMPP protocol core: stanza parsing, typed payloads, and
//! deterministic serialization.
//!
//! ## Architecture
//!
//! - **xml**: element events, tree building, and escaping
//! - **parser**: registry-driven streaming stanza parser
//! - **payload**: typed payloads paired with their parsers
//! - **serializer**: stanza rendering back to wire text
//! - **jid**: address parsing and normalization
//!
//! ## XEP Support
//!
//! - XEP-0054: vcard-temp (profile subset)
//! - XEP-0060: Publish-Subscribe (subscription surface)
//! - XEP-0144: Roster Item Exchange
//! - XEP-0199: XMPP Ping
//! - XEP-0203: Delayed Delivery

pub mod error;
pub mod jid;
pub mod parser;
pub mod payload;
pub mod serializer;
pub mod stanza;
pub mod xml;

pub use error::{JidError, StreamParseError};
pub use jid::Jid;
pub use parser::{ParserRegistry, PayloadParser, StanzaParser};
pub use payload::Payload;
pub use stanza::{IqKind, MessageKind, PresenceKind, Stanza, StanzaKind, random_id};

/// Namespace URIs spoken by this crate.
pub mod ns {
    pub const JABBER_CLIENT: &str = "jabber:client";
    pub const DELAY: &str = "urn:xmpp:delay";
    pub const PING: &str = "urn:xmpp:ping";
    pub const PUBSUB: &str = "http://jabber.org/protocol/pubsub";
    pub const ROSTER_EXCHANGE: &str = "http://jabber.org/protocol/rosterx";
    pub const VCARD_TEMP: &str = "vcard-temp";
}
