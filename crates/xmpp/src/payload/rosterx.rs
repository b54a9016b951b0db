//! Roster item exchange (XEP-0144).
//!
//! ## XML Format
//!
//! ```xml
//! <x xmlns='http://jabber.org/protocol/rosterx'>
//!   <item action='add' jid='rosencrantz@denmark.example' name='Rosencrantz'>
//!     <group>Courtiers</group>
//!   </item>
//! </x>
//! ```

use serde::{Deserialize, Serialize};

use crate::jid::Jid;
use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

/// What the sender suggests doing with an exchanged item.
///
/// `Add` is the fallback for a missing or unknown `action` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterExchangeAction {
    #[default]
    Add,
    Modify,
    Delete,
}

impl RosterExchangeAction {
    pub fn from_token(token: &str) -> Self {
        match token {
            "modify" => Self::Modify,
            "delete" => Self::Delete,
            _ => Self::Add,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterExchangeItem {
    pub jid: Option<Jid>,
    pub name: Option<String>,
    pub action: RosterExchangeAction,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterItemExchange {
    pub items: Vec<RosterExchangeItem>,
}

impl RosterItemExchange {
    pub fn to_element(&self) -> Element {
        let mut root = Element::new("x", ns::ROSTER_EXCHANGE);
        for item in &self.items {
            let mut child = Element::new("item", ns::ROSTER_EXCHANGE);
            child.set_attr("action", item.action.token());
            if let Some(jid) = &item.jid {
                child.set_attr("jid", &jid.to_string());
            }
            if let Some(name) = &item.name {
                child.set_attr("name", name);
            }
            for group in &item.groups {
                let mut group_element = Element::new("group", ns::ROSTER_EXCHANGE);
                group_element.append_text(group);
                child.append_child(group_element);
            }
            root.append_child(child);
        }
        root
    }
}

/// Level-tracking parser for the exchange payload. Items sit one level
/// below the root, groups one level below an item; group text is buffered
/// and taken when the `<group/>` element closes.
#[derive(Default)]
pub struct RosterItemExchangeParser {
    depth: u32,
    exchange: RosterItemExchange,
    current_item: RosterExchangeItem,
    in_item: bool,
    text: String,
}

impl RosterItemExchangeParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for RosterItemExchangeParser {
    fn handle_start(&mut self, name: &str, _namespace: &str, attributes: &AttributeList) {
        if self.depth == 1 {
            if name == "item" {
                self.in_item = true;
                self.current_item = RosterExchangeItem {
                    jid: attributes.get("jid").and_then(|value| value.parse().ok()),
                    name: attributes.get("name").map(str::to_owned),
                    action: RosterExchangeAction::from_token(
                        attributes.get("action").unwrap_or(""),
                    ),
                    groups: Vec::new(),
                };
            }
        } else if self.depth == 2 {
            self.text.clear();
        }
        self.depth += 1;
    }

    fn handle_end(&mut self, name: &str, _namespace: &str) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 1 {
            if self.in_item {
                self.exchange
                    .items
                    .push(std::mem::take(&mut self.current_item));
                self.in_item = false;
            }
        } else if self.depth == 2 && name == "group" {
            self.current_item.groups.push(std::mem::take(&mut self.text));
        }
    }

    fn handle_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::RosterItemExchange(self.exchange)
    }
}
