//! Display-name resolution for contacts, rooms, and the account owner.

use std::sync::Arc;

use rookery_xmpp::payload::vcard::VCard;
use rookery_xmpp::Jid;
use tracing::debug;

/// Names the roster knows contacts by.
pub trait RosterNames: Send + Sync {
    fn name_for(&self, jid: &Jid) -> Option<String>;
}

/// Knows which bare addresses are multi-user chat rooms.
pub trait MucRegistry: Send + Sync {
    fn is_room(&self, jid: &Jid) -> bool;
}

/// Resolves the name to show for any address.
///
/// Resolution order: the owner's own nick for their own account, the room
/// nickname (the resource) for room occupants, the roster name for known
/// contacts, and the bare address as the last resort. The own nick comes
/// from the owner's vCard and changes are announced to listeners.
pub struct NickResolver {
    own_jid: Jid,
    own_nick: Option<String>,
    roster: Arc<dyn RosterNames>,
    rooms: Arc<dyn MucRegistry>,
    listeners: Vec<Box<dyn FnMut(&str)>>,
}

impl NickResolver {
    pub fn new(own_jid: Jid, roster: Arc<dyn RosterNames>, rooms: Arc<dyn MucRegistry>) -> Self {
        Self {
            own_jid: own_jid.to_bare(),
            own_nick: None,
            roster,
            rooms,
            listeners: Vec::new(),
        }
    }

    pub fn on_own_nick_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn own_nick(&self) -> Option<&str> {
        self.own_nick.as_deref()
    }

    pub fn nick_for(&self, jid: &Jid) -> String {
        let bare = jid.to_bare();
        if bare == self.own_jid {
            if let Some(nick) = &self.own_nick {
                if !nick.is_empty() {
                    return nick.clone();
                }
            }
        }
        if self.rooms.is_room(&bare) {
            return match jid.resource() {
                Some(resource) => resource.to_owned(),
                None => bare.to_string(),
            };
        }
        if let Some(name) = self.roster.name_for(&bare) {
            if !name.is_empty() {
                return name;
            }
        }
        bare.to_string()
    }

    /// Takes the own nick from the owner's vCard: nickname first, then
    /// given name, then full name, then the bare address. vCards for other
    /// accounts are ignored.
    pub fn handle_vcard(&mut self, from: &Jid, vcard: &VCard) {
        if !from.eq_bare(&self.own_jid) {
            return;
        }
        let nick = [
            vcard.nickname.as_deref(),
            vcard.given_name.as_deref(),
            vcard.full_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| self.own_jid.to_string());

        if self.own_nick.as_deref() == Some(nick.as_str()) {
            return;
        }
        debug!(nick = %nick, "own nick changed");
        self.own_nick = Some(nick.clone());
        for listener in &mut self.listeners {
            listener(&nick);
        }
    }
}
