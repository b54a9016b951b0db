//! Stanza rendering.

use crate::ns;
use crate::stanza::Stanza;
use crate::xml::Element;

/// Builds the wire element for a stanza. Envelope attributes appear only
/// when set, always in `from`, `to`, `id`, `type` order; payloads keep
/// their stored order. The same stanza always renders to the same text.
pub fn stanza_to_element(stanza: &Stanza) -> Element {
    let mut element = Element::new(stanza.kind.element_name(), ns::JABBER_CLIENT);
    if let Some(from) = &stanza.from {
        element.set_attr("from", &from.to_string());
    }
    if let Some(to) = &stanza.to {
        element.set_attr("to", &to.to_string());
    }
    if let Some(id) = &stanza.id {
        element.set_attr("id", id);
    }
    if let Some(type_attr) = &stanza.type_attr {
        element.set_attr("type", type_attr);
    }
    for payload in &stanza.payloads {
        element.append_child(payload.to_element());
    }
    element
}

pub fn serialize(stanza: &Stanza) -> String {
    stanza_to_element(stanza).to_xml()
}
