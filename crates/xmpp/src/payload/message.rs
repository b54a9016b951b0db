//! Message body payload.

use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

/// `<body/>` text content of a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    pub text: String,
}

impl Body {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }

    pub fn to_element(&self) -> Element {
        Element::builder("body", ns::JABBER_CLIENT)
            .text(&self.text)
            .build()
    }
}

/// Collects the direct text of `<body/>`, ignoring any nested markup.
#[derive(Default)]
pub struct BodyParser {
    depth: u32,
    text: String,
}

impl BodyParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for BodyParser {
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
        Payload::Body(Body { text: self.text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::ElementEvent;

    fn parse(events: &[ElementEvent]) -> Payload {
        let mut parser = Box::new(BodyParser::new());
        for event in events {
            match event {
                ElementEvent::Start {
                    name,
                    namespace,
                    attributes,
                } => parser.handle_start(name, namespace, attributes),
                ElementEvent::End { name, namespace } => parser.handle_end(name, namespace),
                ElementEvent::Text(text) => parser.handle_text(text),
            }
        }
        parser.finish()
    }

    #[test]
    fn captures_direct_text() {
        let events = Body::new("hello there").to_element().to_events();
        assert_eq!(parse(&events), Payload::Body(Body::new("hello there")));
    }

    #[test]
    fn concatenates_split_text_events() {
        let events = vec![
            ElementEvent::start("body", ns::JABBER_CLIENT, AttributeList::new()),
            ElementEvent::text("one "),
            ElementEvent::text("two"),
            ElementEvent::end("body", ns::JABBER_CLIENT),
        ];
        assert_eq!(parse(&events), Payload::Body(Body::new("one two")));
    }

    #[test]
    fn ignores_text_inside_nested_elements() {
        let events = vec![
            ElementEvent::start("body", ns::JABBER_CLIENT, AttributeList::new()),
            ElementEvent::text("kept"),
            ElementEvent::start("span", "http://example.com/markup", AttributeList::new()),
            ElementEvent::text("dropped"),
            ElementEvent::end("span", "http://example.com/markup"),
            ElementEvent::end("body", ns::JABBER_CLIENT),
        ];
        assert_eq!(parse(&events), Payload::Body(Body::new("kept")));
    }

    #[test]
    fn serializes_with_escaped_text() {
        let body = Body::new("a < b & c");
        assert_eq!(
            body.to_element().to_xml(),
            "<body xmlns='jabber:client'>a &lt; b &amp; c</body>"
        );
    }
}
