//! Minimal XML building blocks shared by the parser and serializer.
//!
//! Parsing consumes [`ElementEvent`] values pushed by an external tokenizer;
//! serialization builds an [`Element`] tree and renders it to text. The two
//! sides meet in [`Element::to_events`], which replays a built tree as the
//! event stream a tokenizer would have produced for it.

/// A single attribute on an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Ordered attribute collection. Lookup returns the first match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut list = Self::new();
        for (name, value) in pairs {
            list.set(name, value);
        }
        list
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Replaces an existing attribute in place, otherwise appends.
    pub fn set(&mut self, name: &str, value: &str) {
        for attribute in &mut self.attributes {
            if attribute.name == name {
                attribute.value = value.to_owned();
                return;
            }
        }
        self.attributes.push(Attribute {
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One tokenizer callback, in document order.
///
/// The stream contract is the usual SAX one: events arrive one at a time
/// with no lookahead, starts and ends are properly nested, and character
/// data may be split into multiple consecutive `Text` events.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEvent {
    Start {
        name: String,
        namespace: String,
        attributes: AttributeList,
    },
    End {
        name: String,
        namespace: String,
    },
    Text(String),
}

impl ElementEvent {
    pub fn start(name: &str, namespace: &str, attributes: AttributeList) -> Self {
        Self::Start {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
            attributes,
        }
    }

    pub fn end(name: &str, namespace: &str) -> Self {
        Self::End {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element tree used on the serialization side.
///
/// Attributes and children keep insertion order, so rendering the same
/// value always produces the same text.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    namespace: String,
    attributes: AttributeList,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
            attributes: AttributeList::new(),
            children: Vec::new(),
        }
    }

    pub fn builder(name: &str, namespace: &str) -> ElementBuilder {
        ElementBuilder {
            element: Element::new(name, namespace),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.set(name, value);
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_text(&mut self, text: &str) {
        self.children.push(Node::Text(text.to_owned()));
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Renders the element to text with single-quoted attributes.
    ///
    /// An `xmlns` declaration is emitted on the root and on any child whose
    /// namespace differs from its parent's, matching the inherited-default
    /// namespace convention of the XMPP wire format.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out, None);
        out
    }

    fn write_xml(&self, out: &mut String, parent_namespace: Option<&str>) {
        out.push('<');
        out.push_str(&self.name);
        if !self.namespace.is_empty() && parent_namespace != Some(self.namespace.as_str()) {
            out.push_str(" xmlns='");
            out.push_str(&escape_attr(&self.namespace));
            out.push('\'');
        }
        for attribute in self.attributes.iter() {
            out.push(' ');
            out.push_str(&attribute.name);
            out.push_str("='");
            out.push_str(&escape_attr(&attribute.value));
            out.push('\'');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_xml(out, Some(&self.namespace)),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Replays the tree as the event stream a tokenizer would produce.
    pub fn to_events(&self) -> Vec<ElementEvent> {
        let mut events = Vec::new();
        self.push_events(&mut events);
        events
    }

    fn push_events(&self, events: &mut Vec<ElementEvent>) {
        events.push(ElementEvent::Start {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            attributes: self.attributes.clone(),
        });
        for child in &self.children {
            match child {
                Node::Element(element) => element.push_events(events),
                Node::Text(text) => events.push(ElementEvent::Text(text.clone())),
            }
        }
        events.push(ElementEvent::End {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
        });
    }
}

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    pub fn append(mut self, child: Element) -> Self {
        self.element.append_child(child);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.append_text(text);
        self
    }

    pub fn build(self) -> Element {
        self.element
    }
}

pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
