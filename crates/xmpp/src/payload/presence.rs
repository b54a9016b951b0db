//! Presence child payloads: `<status/>`, `<show/>`, and `<priority/>`.

use serde::{Deserialize, Serialize};

use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

/// Free-form status line attached to a presence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
}

impl Status {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }

    pub fn to_element(&self) -> Element {
        Element::builder("status", ns::JABBER_CLIENT)
            .text(&self.text)
            .build()
    }
}

/// Availability value carried by `<show/>`.
///
/// `Available` stands for a presence without a `<show/>` child and doubles
/// as the fallback for unknown tokens, so conversion from text is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowKind {
    #[default]
    Available,
    Away,
    Chat,
    Dnd,
    Xa,
}

impl ShowKind {
    pub fn from_token(token: &str) -> Self {
        match token {
            "away" => Self::Away,
            "chat" => Self::Chat,
            "dnd" => Self::Dnd,
            "xa" => Self::Xa,
            _ => Self::Available,
        }
    }

    /// Wire token. `Available` has no real wire form; it renders as
    /// "available" so the mapping stays total.
    pub fn token(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Away => "away",
            Self::Chat => "chat",
            Self::Dnd => "dnd",
            Self::Xa => "xa",
        }
    }
}

pub fn show_element(show: ShowKind) -> Element {
    Element::builder("show", ns::JABBER_CLIENT)
        .text(show.token())
        .build()
}

pub fn priority_element(priority: i32) -> Element {
    Element::builder("priority", ns::JABBER_CLIENT)
        .text(&priority.to_string())
        .build()
}

#[derive(Default)]
pub struct StatusParser {
    depth: u32,
    text: String,
}

impl StatusParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for StatusParser {
    fn handle_start(&mut self, _name: &str, _namespace: &str, _attributes: &AttributeList) {
        self.depth += 1;
    }

    fn handle_end(&mut self, _name: &str, _namespace: &str) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn handle_text(&mut self, text: &str) {
        if self.depth == 1 {
            self.text.push_str(text);
        }
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::Status(Status { text: self.text })
    }
}

#[derive(Default)]
pub struct ShowParser {
    depth: u32,
    text: String,
}

impl ShowParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for ShowParser {
    fn handle_start(&mut self, _name: &str, _namespace: &str, _attributes: &AttributeList) {
        self.depth += 1;
    }

    fn handle_end(&mut self, _name: &str, _namespace: &str) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn handle_text(&mut self, text: &str) {
        if self.depth == 1 {
            self.text.push_str(text);
        }
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::Show(ShowKind::from_token(self.text.trim()))
    }
}

/// Parses `<priority/>`. A value that is not an integer falls back to 0,
/// the protocol default.
#[derive(Default)]
pub struct PriorityParser {
    depth: u32,
    text: String,
}

impl PriorityParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for PriorityParser {
    fn handle_start(&mut self, _name: &str, _namespace: &str, _attributes: &AttributeList) {
        self.depth += 1;
    }

    fn handle_end(&mut self, _name: &str, _namespace: &str) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn handle_text(&mut self, text: &str) {
        if self.depth == 1 {
            self.text.push_str(text);
        }
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::Priority(self.text.trim().parse().unwrap_or(0))
    }
}
