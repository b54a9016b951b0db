//! # rookery-presence
//!
//! Presence tracking and nick resolution on top of `rookery-xmpp`.
//!
//! ## Architecture
//!
//! - **oracle**: last presence per full address, subscription routing
//! - **nick**: display names for contacts, room occupants, and the owner

pub mod nick;
pub mod oracle;

pub use nick::{MucRegistry, NickResolver, RosterNames};
pub use oracle::{ConnectionEvent, PresenceOracle, SubscriptionRequest};
