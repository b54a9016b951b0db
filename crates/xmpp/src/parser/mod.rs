//! SAX-style stanza parsing over element events.
//!
//! [`StanzaParser`] consumes the event stream one stanza at a time, handing
//! the subtree under each recognized child element to a payload parser
//! created from the [`ParserRegistry`]. Memory stays proportional to
//! element depth; no tree is built for the payloads parsed on the fly.
//!
//! Payload parsers share one contract: the opening tag of their own root
//! element is the first event they receive (attributes included), every
//! event inside the subtree follows, and the closing tag of that root is
//! the last. [`DelegatingParser`] implements the bookkeeping once and is
//! reused by the stanza layer and by payloads that nest other payloads.

mod registry;
mod stanza;

pub use registry::{ParserFactory, ParserRegistry};
pub use stanza::StanzaParser;

use std::sync::Arc;

use crate::payload::Payload;
use crate::xml::AttributeList;

/// Streaming parser for one payload subtree.
pub trait PayloadParser {
    fn handle_start(&mut self, name: &str, namespace: &str, attributes: &AttributeList);
    fn handle_end(&mut self, name: &str, namespace: &str);
    fn handle_text(&mut self, text: &str);
    /// Consumes the parser once its root element has closed.
    fn finish(self: Box<Self>) -> Payload;
}

/// A direct child element that just closed under a [`DelegatingParser`].
///
/// `payload` is `None` when no parser was registered for the child; the
/// name and namespace still identify it, which is enough for markers like
/// `<required/>`.
pub struct ClosedChild {
    pub name: String,
    pub namespace: String,
    pub payload: Option<Payload>,
}

/// Depth bookkeeping shared by every parser that owns a subtree and hands
/// direct children to parsers from the registry.
///
/// Depth 0 is "before my root element"; the owner's root start moves it to
/// 1. A start at depth 1 is a direct child: a parser is created for it and
/// receives that same start as its own root. Ends decrement first, so a
/// child's closing tag is forwarded to the child before the child is
/// finished and handed back as a [`ClosedChild`]. Text forwards only above
/// depth 1; text at depth 1 belongs to the owner.
pub struct DelegatingParser {
    registry: Arc<ParserRegistry>,
    depth: u32,
    child: Option<Box<dyn PayloadParser>>,
}

impl DelegatingParser {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            registry,
            depth: 0,
            child: None,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn handle_start(&mut self, name: &str, namespace: &str, attributes: &AttributeList) {
        if self.depth == 1 {
            self.child = ParserRegistry::create(&self.registry, name, namespace);
        }
        if self.depth >= 1 {
            if let Some(child) = self.child.as_mut() {
                child.handle_start(name, namespace, attributes);
            }
        }
        self.depth += 1;
    }

    /// Returns the finished child when this end closes a direct child.
    pub fn handle_end(&mut self, name: &str, namespace: &str) -> Option<ClosedChild> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth >= 1 {
            if let Some(child) = self.child.as_mut() {
                child.handle_end(name, namespace);
            }
        }
        if self.depth == 1 {
            let payload = self.child.take().map(|child| child.finish());
            return Some(ClosedChild {
                name: name.to_owned(),
                namespace: namespace.to_owned(),
                payload,
            });
        }
        None
    }

    pub fn handle_text(&mut self, text: &str) {
        if self.depth > 1 {
            if let Some(child) = self.child.as_mut() {
                child.handle_text(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns;
    use crate::payload::message::Body;

    fn delegating() -> DelegatingParser {
        DelegatingParser::new(Arc::new(ParserRegistry::with_defaults()))
    }

    #[test]
    fn direct_child_receives_its_own_root_events() {
        let mut parser = delegating();
        parser.handle_start("message", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_start("body", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_text("hello");
        let closed = parser.handle_end("body", ns::JABBER_CLIENT).unwrap();
        assert_eq!(closed.name, "body");
        assert_eq!(closed.payload, Some(Payload::Body(Body::new("hello"))));
        assert!(parser.handle_end("message", ns::JABBER_CLIENT).is_none());
        assert_eq!(parser.depth(), 0);
    }

    #[test]
    fn unrecognized_child_closes_without_payload() {
        let mut parser = delegating();
        parser.handle_start("message", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_start("mystery", "urn:example:unknown", &AttributeList::new());
        parser.handle_text("ignored");
        let closed = parser.handle_end("mystery", "urn:example:unknown").unwrap();
        assert_eq!(closed.name, "mystery");
        assert_eq!(closed.namespace, "urn:example:unknown");
        assert_eq!(closed.payload, None);
    }

    #[test]
    fn depth_survives_nesting_inside_unknown_children() {
        let mut parser = delegating();
        parser.handle_start("message", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_start("outer", "urn:example:unknown", &AttributeList::new());
        parser.handle_start("body", ns::JABBER_CLIENT, &AttributeList::new());
        assert_eq!(parser.depth(), 3);
        // The inner <body/> is not a direct child, so nothing closes here.
        assert!(parser.handle_end("body", ns::JABBER_CLIENT).is_none());
        assert!(parser.handle_end("outer", "urn:example:unknown").is_some());
        assert_eq!(parser.depth(), 1);
    }

    #[test]
    fn text_at_owner_level_is_not_forwarded() {
        let mut parser = delegating();
        parser.handle_start("message", ns::JABBER_CLIENT, &AttributeList::new());
        // No child is active; this must not panic or create one.
        parser.handle_text("stray");
        parser.handle_start("body", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_text("kept");
        let closed = parser.handle_end("body", ns::JABBER_CLIENT).unwrap();
        assert_eq!(closed.payload, Some(Payload::Body(Body::new("kept"))));
    }

    #[test]
    fn sibling_children_get_separate_parsers() {
        let mut parser = delegating();
        parser.handle_start("message", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_start("body", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_text("first");
        let first = parser.handle_end("body", ns::JABBER_CLIENT).unwrap();
        parser.handle_start("body", ns::JABBER_CLIENT, &AttributeList::new());
        parser.handle_text("second");
        let second = parser.handle_end("body", ns::JABBER_CLIENT).unwrap();
        assert_eq!(first.payload, Some(Payload::Body(Body::new("first"))));
        assert_eq!(second.payload, Some(Payload::Body(Body::new("second"))));
    }
}
