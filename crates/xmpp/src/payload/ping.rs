//! Application-level pings (XEP-0199).
//!
//! ## XML Format
//!
//! ```xml
//! <iq type='get' id='ping-1'><ping xmlns='urn:xmpp:ping'/></iq>
//! ```

use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

pub fn ping_element() -> Element {
    Element::new("ping", ns::PING)
}

/// `<ping/>` carries no data; the parser only has to exist so the element
/// is recognized instead of skipped.
#[derive(Default)]
pub struct PingParser;

impl PingParser {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadParser for PingParser {
    fn handle_start(&mut self, _name: &str, _namespace: &str, _attributes: &AttributeList) {}

    fn handle_end(&mut self, _name: &str, _namespace: &str) {}

    fn handle_text(&mut self, _text: &str) {}

    fn finish(self: Box<Self>) -> Payload {
        Payload::Ping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_bare_ping_element() {
        assert_eq!(ping_element().to_xml(), "<ping xmlns='urn:xmpp:ping'/>");
    }

    #[test]
    fn parser_yields_the_ping_payload() {
        let mut parser = Box::new(PingParser::new());
        parser.handle_start("ping", ns::PING, &AttributeList::new());
        parser.handle_end("ping", ns::PING);
        assert_eq!(parser.finish(), Payload::Ping);
    }
}
