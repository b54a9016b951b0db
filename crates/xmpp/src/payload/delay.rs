//! Delayed delivery timestamps (XEP-0203).
//!
//! ## XML Format
//!
//! ```xml
//! <delay xmlns='urn:xmpp:delay'
//!        from='capulet.example'
//!        stamp='2002-09-10T23:08:25Z'/>
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

use crate::jid::Jid;
use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

/// When and by whom a stanza was held back before delivery.
///
/// Both attributes are optional on the wire; an unparsable value leaves
/// its field unset rather than failing the stanza.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delay {
    pub from: Option<Jid>,
    pub stamp: Option<DateTime<Utc>>,
}

impl Delay {
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("delay", ns::DELAY);
        if let Some(from) = &self.from {
            element.set_attr("from", &from.to_string());
        }
        if let Some(stamp) = &self.stamp {
            element.set_attr("stamp", &stamp.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        element
    }
}

#[derive(Default)]
pub struct DelayParser {
    depth: u32,
    delay: Delay,
}

impl DelayParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for DelayParser {
    fn handle_start(&mut self, _name: &str, _namespace: &str, attributes: &AttributeList) {
        if self.depth == 0 {
            self.delay.from = attributes.get("from").and_then(|value| value.parse().ok());
            self.delay.stamp = attributes.get("stamp").and_then(|value| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|stamp| stamp.with_timezone(&Utc))
            });
        }
        self.depth += 1;
    }

    fn handle_end(&mut self, _name: &str, _namespace: &str) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn handle_text(&mut self, _text: &str) {}

    fn finish(self: Box<Self>) -> Payload {
        Payload::Delay(self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::ElementEvent;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn parse(attributes: AttributeList) -> Delay {
        let mut parser = Box::new(DelayParser::new());
        parser.handle_start("delay", ns::DELAY, &attributes);
        parser.handle_end("delay", ns::DELAY);
        match parser.finish() {
            Payload::Delay(delay) => delay,
            other => panic!("expected delay payload, got {other:?}"),
        }
    }

    #[test]
    fn reads_from_and_stamp() {
        let delay = parse(AttributeList::from_pairs([
            ("from", "capulet.example"),
            ("stamp", "2002-09-10T23:08:25Z"),
        ]));
        assert_eq!(delay.from, Some("capulet.example".parse().unwrap()));
        assert_eq!(
            delay.stamp,
            Some(Utc.with_ymd_and_hms(2002, 9, 10, 23, 8, 25).unwrap())
        );
    }

    #[test]
    fn accepts_offset_timestamps_as_utc() {
        let delay = parse(AttributeList::from_pairs([(
            "stamp",
            "2002-09-10T21:08:25-02:00",
        )]));
        assert_eq!(
            delay.stamp,
            Some(Utc.with_ymd_and_hms(2002, 9, 10, 23, 8, 25).unwrap())
        );
    }

    #[test]
    fn unparsable_values_leave_fields_unset() {
        let delay = parse(AttributeList::from_pairs([
            ("from", ""),
            ("stamp", "last tuesday"),
        ]));
        assert_eq!(delay.from, None);
        assert_eq!(delay.stamp, None);
    }

    #[test]
    fn missing_attributes_leave_fields_unset() {
        let delay = parse(AttributeList::new());
        assert_matches!(delay, Delay { from: None, stamp: None });
    }

    #[test]
    fn serializes_stamp_in_utc_with_seconds() {
        let delay = Delay {
            from: Some("capulet.example".parse().unwrap()),
            stamp: Some(Utc.with_ymd_and_hms(2002, 9, 10, 23, 8, 25).unwrap()),
        };
        assert_eq!(
            delay.to_element().to_xml(),
            "<delay xmlns='urn:xmpp:delay' from='capulet.example' stamp='2002-09-10T23:08:25Z'/>"
        );
    }

    #[test]
    fn empty_delay_serializes_without_attributes() {
        assert_eq!(Delay::default().to_element().to_xml(), "<delay xmlns='urn:xmpp:delay'/>");
    }

    #[test]
    fn event_round_trip_preserves_fields() {
        let delay = Delay {
            from: Some("montague.example".parse().unwrap()),
            stamp: Some(Utc.with_ymd_and_hms(2010, 1, 2, 3, 4, 5).unwrap()),
        };
        let events = delay.to_element().to_events();
        let mut parser: Box<dyn PayloadParser> = Box::new(DelayParser::new());
        for event in &events {
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
        assert_eq!(parser.finish(), Payload::Delay(delay));
    }
}
