//! Stanza envelope and the kind vocabulary shared across the crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jid::Jid;
use crate::payload::delay::Delay;
use crate::payload::presence::ShowKind;
use crate::payload::vcard::VCard;
use crate::payload::Payload;
use crate::serializer;
use crate::xml::Element;

/// Top-level stanza element names defined by RFC 6120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanzaKind {
    Message,
    Presence,
    Iq,
}

impl StanzaKind {
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Presence => "presence",
            Self::Iq => "iq",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "message" => Some(Self::Message),
            "presence" => Some(Self::Presence),
            "iq" => Some(Self::Iq),
            _ => None,
        }
    }
}

/// Presence `type` attribute values.
///
/// `Available` is the absence of a type attribute on the wire; an unknown
/// token also maps to `Available` so that reading the attribute is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceKind {
    #[default]
    Available,
    Unavailable,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    Probe,
    Error,
}

impl PresenceKind {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("unavailable") => Self::Unavailable,
            Some("subscribe") => Self::Subscribe,
            Some("subscribed") => Self::Subscribed,
            Some("unsubscribe") => Self::Unsubscribe,
            Some("unsubscribed") => Self::Unsubscribed,
            Some("probe") => Self::Probe,
            Some("error") => Self::Error,
            _ => Self::Available,
        }
    }

    /// The wire attribute, with `None` for `Available`.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Available => None,
            Self::Unavailable => Some("unavailable"),
            Self::Subscribe => Some("subscribe"),
            Self::Subscribed => Some("subscribed"),
            Self::Unsubscribe => Some("unsubscribe"),
            Self::Unsubscribed => Some("unsubscribed"),
            Self::Probe => Some("probe"),
            Self::Error => Some("error"),
        }
    }
}

/// Message `type` attribute values, with `Normal` as the wire default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Normal,
    Chat,
    Groupchat,
    Headline,
    Error,
}

impl MessageKind {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("chat") => Self::Chat,
            Some("groupchat") => Self::Groupchat,
            Some("headline") => Self::Headline,
            Some("error") => Self::Error,
            _ => Self::Normal,
        }
    }

    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Chat => Some("chat"),
            Self::Groupchat => Some("groupchat"),
            Self::Headline => Some("headline"),
            Self::Error => Some("error"),
        }
    }
}

/// Iq `type` attribute values. Unlike presence and message there is no
/// default; an iq without a recognized type has no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IqKind {
    Get,
    Set,
    Result,
    Error,
}

impl IqKind {
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value {
            Some("get") => Some(Self::Get),
            Some("set") => Some(Self::Set),
            Some("result") => Some(Self::Result),
            Some("error") => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Result => "result",
            Self::Error => "error",
        }
    }
}

/// A parsed or outgoing stanza.
///
/// The envelope attributes are optional to mirror the wire, where any of
/// them may be absent. Payloads keep document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stanza {
    pub kind: StanzaKind,
    pub from: Option<Jid>,
    pub to: Option<Jid>,
    pub id: Option<String>,
    pub type_attr: Option<String>,
    pub payloads: Vec<Payload>,
}

impl Stanza {
    pub fn new(kind: StanzaKind) -> Self {
        Self {
            kind,
            from: None,
            to: None,
            id: None,
            type_attr: None,
            payloads: Vec::new(),
        }
    }

    pub fn message() -> Self {
        Self::new(StanzaKind::Message)
    }

    pub fn presence() -> Self {
        Self::new(StanzaKind::Presence)
    }

    pub fn iq() -> Self {
        Self::new(StanzaKind::Iq)
    }

    pub fn with_from(mut self, from: Jid) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Jid) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    pub fn with_type(mut self, type_attr: &str) -> Self {
        self.type_attr = Some(type_attr.to_owned());
        self
    }

    pub fn with_presence_kind(mut self, kind: PresenceKind) -> Self {
        self.type_attr = kind.as_attr().map(str::to_owned);
        self
    }

    pub fn with_message_kind(mut self, kind: MessageKind) -> Self {
        self.type_attr = kind.as_attr().map(str::to_owned);
        self
    }

    pub fn with_iq_kind(mut self, kind: IqKind) -> Self {
        self.type_attr = Some(kind.as_attr().to_owned());
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payloads.push(payload);
        self
    }

    pub fn presence_kind(&self) -> Option<PresenceKind> {
        match self.kind {
            StanzaKind::Presence => Some(PresenceKind::from_attr(self.type_attr.as_deref())),
            _ => None,
        }
    }

    pub fn message_kind(&self) -> Option<MessageKind> {
        match self.kind {
            StanzaKind::Message => Some(MessageKind::from_attr(self.type_attr.as_deref())),
            _ => None,
        }
    }

    pub fn iq_kind(&self) -> Option<IqKind> {
        match self.kind {
            StanzaKind::Iq => IqKind::from_attr(self.type_attr.as_deref()),
            _ => None,
        }
    }

    /// First `<body/>` payload text, if any.
    pub fn body(&self) -> Option<&str> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::Body(body) => Some(body.text.as_str()),
            _ => None,
        })
    }

    /// First `<status/>` payload text, if any.
    pub fn status(&self) -> Option<&str> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::Status(status) => Some(status.text.as_str()),
            _ => None,
        })
    }

    pub fn show(&self) -> Option<ShowKind> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::Show(show) => Some(*show),
            _ => None,
        })
    }

    pub fn priority(&self) -> Option<i32> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::Priority(priority) => Some(*priority),
            _ => None,
        })
    }

    pub fn delay(&self) -> Option<&Delay> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::Delay(delay) => Some(delay),
            _ => None,
        })
    }

    pub fn vcard(&self) -> Option<&VCard> {
        self.payloads.iter().find_map(|payload| match payload {
            Payload::VCard(vcard) => Some(vcard),
            _ => None,
        })
    }

    pub fn to_element(&self) -> Element {
        serializer::stanza_to_element(self)
    }

    pub fn to_xml(&self) -> String {
        self.to_element().to_xml()
    }
}

/// Fresh random stanza id.
pub fn random_id() -> String {
    Uuid::new_v4().to_string()
}
