//! Last-presence bookkeeping per full address.

use std::collections::HashMap;
use std::sync::Arc;

use rookery_xmpp::stanza::PresenceKind;
use rookery_xmpp::{Jid, Stanza};
use tracing::debug;

/// Connection lifecycle notifications the oracle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Established,
    Lost,
}

/// A contact asking to subscribe to our presence.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionRequest {
    pub from: Jid,
    /// Status text from the request, empty when none was given.
    pub reason: String,
}

/// Tracks the most recent presence per full address.
///
/// Each incoming presence replaces the previous record for its exact
/// sender address; resources of the same account never shadow each other.
/// Subscription requests are routed to their own listeners and leave the
/// presence table untouched. Listeners run synchronously in registration
/// order, once per handled stanza, with no deduplication.
#[derive(Default)]
pub struct PresenceOracle {
    records: HashMap<Jid, Arc<Stanza>>,
    presence_listeners: Vec<Box<dyn FnMut(&Arc<Stanza>)>>,
    subscription_listeners: Vec<Box<dyn FnMut(&SubscriptionRequest)>>,
}

impl PresenceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_presence_change<F>(&mut self, listener: F)
    where
        F: FnMut(&Arc<Stanza>) + 'static,
    {
        self.presence_listeners.push(Box::new(listener));
    }

    pub fn on_subscription_request<F>(&mut self, listener: F)
    where
        F: FnMut(&SubscriptionRequest) + 'static,
    {
        self.subscription_listeners.push(Box::new(listener));
    }

    /// Routes one incoming stanza. Anything that is not a presence is
    /// ignored; a presence without a usable sender address is dropped.
    pub fn handle_stanza(&mut self, stanza: &Arc<Stanza>) {
        let Some(kind) = stanza.presence_kind() else {
            return;
        };
        let Some(from) = stanza.from.clone() else {
            debug!("dropping presence without a from address");
            return;
        };
        if kind == PresenceKind::Subscribe {
            let request = SubscriptionRequest {
                from,
                reason: stanza.status().unwrap_or_default().to_owned(),
            };
            for listener in &mut self.subscription_listeners {
                listener(&request);
            }
            return;
        }
        self.records.insert(from, Arc::clone(stanza));
        for listener in &mut self.presence_listeners {
            listener(stanza);
        }
    }

    pub fn handle_connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Established => {}
            ConnectionEvent::Lost => {
                debug!("connection lost, clearing presence state");
                self.records.clear();
            }
        }
    }

    /// Last presence seen from exactly this address, resource included.
    pub fn last_presence(&self, jid: &Jid) -> Option<Arc<Stanza>> {
        self.records.get(jid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rookery_xmpp::payload::presence::Status;
    use rookery_xmpp::Payload;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn presence(from: &str, status: &str) -> Arc<Stanza> {
        Arc::new(
            Stanza::presence()
                .with_from(from.parse().unwrap())
                .with_payload(Payload::Status(Status::new(status))),
        )
    }

    fn subscribe_request(from: &str, reason: &str) -> Arc<Stanza> {
        Arc::new(
            Stanza::presence()
                .with_presence_kind(PresenceKind::Subscribe)
                .with_from(from.parse().unwrap())
                .with_payload(Payload::Status(Status::new(reason))),
        )
    }

    struct Recorded {
        changes: Rc<RefCell<Vec<Arc<Stanza>>>>,
        requests: Rc<RefCell<Vec<SubscriptionRequest>>>,
    }

    fn recording_oracle() -> (PresenceOracle, Recorded) {
        let mut oracle = PresenceOracle::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let requests = Rc::new(RefCell::new(Vec::new()));
        let change_sink = Rc::clone(&changes);
        oracle.on_presence_change(move |stanza| change_sink.borrow_mut().push(Arc::clone(stanza)));
        let request_sink = Rc::clone(&requests);
        oracle.on_subscription_request(move |request| {
            request_sink.borrow_mut().push(request.clone())
        });
        (oracle, Recorded { changes, requests })
    }

    #[test]
    fn received_presence_is_stored_and_announced() {
        let (mut oracle, recorded) = recording_oracle();
        let sent = presence("user1@foo.com/Foo", "blarb");
        oracle.handle_stanza(&sent);

        assert_eq!(recorded.changes.borrow().len(), 1);
        assert_eq!(recorded.requests.borrow().len(), 0);
        let stored = oracle.last_presence(&"user1@foo.com/Foo".parse().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&stored, &sent));
    }

    #[test]
    fn resources_of_one_account_are_tracked_separately() {
        let (mut oracle, _recorded) = recording_oracle();
        let desk = presence("user1@foo.com/Foo", "at my desk");
        let phone = presence("user1@foo.com/Bar", "on the road");
        oracle.handle_stanza(&desk);
        oracle.handle_stanza(&phone);

        let from_desk = oracle.last_presence(&"user1@foo.com/Foo".parse().unwrap()).unwrap();
        let from_phone = oracle.last_presence(&"user1@foo.com/Bar".parse().unwrap()).unwrap();
        assert_eq!(from_desk.status(), Some("at my desk"));
        assert_eq!(from_phone.status(), Some("on the road"));
        assert_matches!(oracle.last_presence(&"user1@foo.com".parse().unwrap()), None);
    }

    #[test]
    fn newer_presence_replaces_the_record_wholesale() {
        let (mut oracle, recorded) = recording_oracle();
        oracle.handle_stanza(&presence("user2@bar.com/Bar", "here"));
        oracle.handle_stanza(&presence("user2@bar.com/Bar", "gone"));

        assert_eq!(recorded.changes.borrow().len(), 2);
        let stored = oracle.last_presence(&"user2@bar.com/Bar".parse().unwrap()).unwrap();
        assert_eq!(stored.status(), Some("gone"));
    }

    #[test]
    fn identical_presence_twice_still_notifies_twice() {
        let (mut oracle, recorded) = recording_oracle();
        let sent = presence("user1@foo.com/Foo", "blarb");
        oracle.handle_stanza(&sent);
        oracle.handle_stanza(&sent);
        assert_eq!(recorded.changes.borrow().len(), 2);
    }

    #[test]
    fn subscription_requests_leave_the_table_alone() {
        let (mut oracle, recorded) = recording_oracle();
        oracle.handle_stanza(&subscribe_request("me@example.com", "Because I want to"));

        assert_eq!(recorded.changes.borrow().len(), 0);
        let requests = recorded.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].from, "me@example.com".parse().unwrap());
        assert_eq!(requests[0].reason, "Because I want to");
        assert_eq!(oracle.last_presence(&"me@example.com".parse().unwrap()), None);
    }

    #[test]
    fn subscription_request_without_status_has_an_empty_reason() {
        let (mut oracle, recorded) = recording_oracle();
        let bare = Arc::new(
            Stanza::presence()
                .with_presence_kind(PresenceKind::Subscribe)
                .with_from("me@example.com".parse().unwrap()),
        );
        oracle.handle_stanza(&bare);
        assert_eq!(recorded.requests.borrow()[0].reason, "");
    }

    #[test]
    fn unavailable_presence_is_stored_like_any_other() {
        let (mut oracle, recorded) = recording_oracle();
        let gone = Arc::new(
            Stanza::presence()
                .with_presence_kind(PresenceKind::Unavailable)
                .with_from("user1@foo.com/Foo".parse().unwrap()),
        );
        oracle.handle_stanza(&gone);

        assert_eq!(recorded.changes.borrow().len(), 1);
        let stored = oracle.last_presence(&"user1@foo.com/Foo".parse().unwrap()).unwrap();
        assert_eq!(stored.presence_kind(), Some(PresenceKind::Unavailable));
    }

    #[test]
    fn presence_without_from_is_dropped_silently() {
        let (mut oracle, recorded) = recording_oracle();
        oracle.handle_stanza(&Arc::new(Stanza::presence()));
        assert_eq!(recorded.changes.borrow().len(), 0);
        assert_eq!(recorded.requests.borrow().len(), 0);
    }

    #[test]
    fn non_presence_stanzas_are_ignored() {
        let (mut oracle, recorded) = recording_oracle();
        let message = Arc::new(Stanza::message().with_from("user1@foo.com/Foo".parse().unwrap()));
        oracle.handle_stanza(&message);
        assert_eq!(recorded.changes.borrow().len(), 0);
        assert_eq!(oracle.last_presence(&"user1@foo.com/Foo".parse().unwrap()), None);
    }

    #[test]
    fn losing_the_connection_clears_every_record() {
        let (mut oracle, _recorded) = recording_oracle();
        oracle.handle_stanza(&presence("user1@foo.com/Foo", "here"));
        oracle.handle_stanza(&presence("user2@bar.com/Bar", "also here"));

        oracle.handle_connection_event(ConnectionEvent::Lost);
        oracle.handle_connection_event(ConnectionEvent::Established);

        assert_eq!(oracle.last_presence(&"user1@foo.com/Foo".parse().unwrap()), None);
        assert_eq!(oracle.last_presence(&"user2@bar.com/Bar".parse().unwrap()), None);
    }
}
