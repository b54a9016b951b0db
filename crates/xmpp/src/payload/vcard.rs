//! vCard profile subset (XEP-0054).
//!
//! Only the handful of fields nick resolution cares about are kept; the
//! rest of the profile passes through the parser untouched.
//!
//! ## XML Format
//!
//! ```xml
//! <vCard xmlns='vcard-temp'>
//!   <FN>Hamlet, Prince of Denmark</FN>
//!   <N><GIVEN>Hamlet</GIVEN></N>
//!   <NICKNAME>the Dane</NICKNAME>
//!   <EMAIL><USERID>hamlet@denmark.example</USERID></EMAIL>
//! </vCard>
//! ```

use crate::ns;
use crate::parser::PayloadParser;
use crate::payload::Payload;
use crate::xml::{AttributeList, Element};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VCard {
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl VCard {
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("vCard", ns::VCARD_TEMP);
        if let Some(full_name) = &self.full_name {
            let mut child = Element::new("FN", ns::VCARD_TEMP);
            child.append_text(full_name);
            element.append_child(child);
        }
        if let Some(given_name) = &self.given_name {
            let mut given = Element::new("GIVEN", ns::VCARD_TEMP);
            given.append_text(given_name);
            let mut name = Element::new("N", ns::VCARD_TEMP);
            name.append_child(given);
            element.append_child(name);
        }
        if let Some(nickname) = &self.nickname {
            let mut child = Element::new("NICKNAME", ns::VCARD_TEMP);
            child.append_text(nickname);
            element.append_child(child);
        }
        if let Some(email) = &self.email {
            let mut userid = Element::new("USERID", ns::VCARD_TEMP);
            userid.append_text(email);
            let mut wrapper = Element::new("EMAIL", ns::VCARD_TEMP);
            wrapper.append_child(userid);
            element.append_child(wrapper);
        }
        element
    }
}

/// Tracks the element path from the `<vCard/>` root and captures text when
/// one of the known leaf paths closes. Unknown branches fall through.
#[derive(Default)]
pub struct VCardParser {
    path: Vec<String>,
    text: String,
    vcard: VCard,
}

impl VCardParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadParser for VCardParser {
    fn handle_start(&mut self, name: &str, _namespace: &str, _attributes: &AttributeList) {
        self.path.push(name.to_owned());
        self.text.clear();
    }

    fn handle_end(&mut self, _name: &str, _namespace: &str) {
        let text = std::mem::take(&mut self.text);
        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["vCard", "FN"] => self.vcard.full_name = Some(text),
            ["vCard", "N", "GIVEN"] => self.vcard.given_name = Some(text),
            ["vCard", "NICKNAME"] => self.vcard.nickname = Some(text),
            ["vCard", "EMAIL", "USERID"] => self.vcard.email = Some(text),
            _ => {}
        }
        self.path.pop();
    }

    fn handle_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn finish(self: Box<Self>) -> Payload {
        Payload::VCard(self.vcard)
    }
}
