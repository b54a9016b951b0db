//! Top-level stanza parser.

use std::sync::Arc;

use tracing::debug;

use crate::error::StreamParseError;
use crate::jid::Jid;
use crate::parser::{ClosedChild, DelegatingParser, ParserRegistry};
use crate::stanza::{Stanza, StanzaKind};
use crate::xml::{AttributeList, ElementEvent};

/// Assembles stanzas from the event stream and delivers each finished one
/// to the registered listeners, synchronously and in registration order.
///
/// Envelope attributes that fail to parse are dropped with a debug log;
/// the stanza itself is still delivered. Unknown top-level elements are
/// skipped whole. The only fatal condition is a structurally broken
/// stream, after which the parser refuses further events.
pub struct StanzaParser {
    delegate: DelegatingParser,
    current: Option<Stanza>,
    listeners: Vec<Box<dyn FnMut(&Arc<Stanza>)>>,
    poisoned: bool,
}

impl StanzaParser {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            delegate: DelegatingParser::new(registry),
            current: None,
            listeners: Vec::new(),
            poisoned: false,
        }
    }

    /// Parser backed by [`ParserRegistry::with_defaults`].
    pub fn with_default_payloads() -> Self {
        Self::new(Arc::new(ParserRegistry::with_defaults()))
    }

    pub fn on_stanza<F>(&mut self, listener: F)
    where
        F: FnMut(&Arc<Stanza>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Element depth of the position in the stream, 0 between stanzas.
    pub fn depth(&self) -> u32 {
        self.delegate.depth()
    }

    pub fn handle_event(&mut self, event: &ElementEvent) -> Result<(), StreamParseError> {
        if self.poisoned {
            return Err(StreamParseError::Poisoned);
        }
        match event {
            ElementEvent::Start {
                name,
                namespace,
                attributes,
            } => {
                if self.delegate.depth() == 0 {
                    self.begin_stanza(name, namespace, attributes);
                }
                self.delegate.handle_start(name, namespace, attributes);
            }
            ElementEvent::End { name, namespace } => {
                if self.delegate.depth() == 0 {
                    self.poisoned = true;
                    return Err(StreamParseError::UnmatchedEnd);
                }
                if let Some(closed) = self.delegate.handle_end(name, namespace) {
                    self.attach_payload(closed);
                }
                if self.delegate.depth() == 0 {
                    self.finish_stanza();
                }
            }
            ElementEvent::Text(text) => self.delegate.handle_text(text),
        }
        Ok(())
    }

    pub fn handle_events<'a, I>(&mut self, events: I) -> Result<(), StreamParseError>
    where
        I: IntoIterator<Item = &'a ElementEvent>,
    {
        for event in events {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn begin_stanza(&mut self, name: &str, namespace: &str, attributes: &AttributeList) {
        let Some(kind) = StanzaKind::from_element_name(name) else {
            debug!(element = %name, namespace = %namespace, "skipping unknown top-level element");
            self.current = None;
            return;
        };
        let mut stanza = Stanza::new(kind);
        stanza.from = parse_jid_attr(attributes, "from");
        stanza.to = parse_jid_attr(attributes, "to");
        stanza.id = attributes.get("id").map(str::to_owned);
        stanza.type_attr = attributes.get("type").map(str::to_owned);
        self.current = Some(stanza);
    }

    fn attach_payload(&mut self, closed: ClosedChild) {
        let Some(stanza) = self.current.as_mut() else {
            return;
        };
        match closed.payload {
            Some(payload) => stanza.payloads.push(payload),
            None => {
                debug!(
                    element = %closed.name,
                    namespace = %closed.namespace,
                    "skipping unrecognized payload"
                );
            }
        }
    }

    fn finish_stanza(&mut self) {
        let Some(stanza) = self.current.take() else {
            return;
        };
        let stanza = Arc::new(stanza);
        for listener in &mut self.listeners {
            listener(&stanza);
        }
    }
}

fn parse_jid_attr(attributes: &AttributeList, name: &str) -> Option<Jid> {
    let value = attributes.get(name)?;
    match value.parse() {
        Ok(jid) => Some(jid),
        Err(error) => {
            debug!(attribute = %name, value = %value, %error, "ignoring unparsable jid attribute");
            None
        }
    }
}
