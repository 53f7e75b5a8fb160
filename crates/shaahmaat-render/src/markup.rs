//! Immutable HTML/SVG tree.
//!
//! Trees are assembled bottom-up with [`ElementBuilder`] and serialized with
//! `Display`. Elements in the SVG namespace self-close when empty; HTML
//! elements always get an explicit end tag.

use std::fmt::{self, Write};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    namespace: Option<&'static str>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements, depth first, in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in self.child_elements() {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Copy of this element with `name` set, replacing any previous value.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>, parent_ns: Option<&str>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(ns) = self.namespace.filter(|ns| Some(*ns) != parent_ns) {
            write!(f, " xmlns=\"{}\"", escape_attr(ns))?;
        }
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", escape_attr(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape_attr(value))?;
        }

        if self.children.is_empty() && self.namespace.is_some() {
            return f.write_str("/>");
        }

        f.write_char('>')?;
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_to(f, self.namespace)?,
                Node::Text(text) => f.write_str(&escape_text(text))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, None)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(el) => fmt::Display::fmt(el, f),
            Node::Text(text) => f.write_str(&escape_text(text)),
        }
    }
}

impl From<ElementBuilder> for Node {
    fn from(builder: ElementBuilder) -> Self {
        Node::Element(builder.build())
    }
}

#[derive(Debug, Clone)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            element: Element {
                tag: tag.into(),
                namespace: None,
                classes: Vec::new(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
        }
    }

    /// Element in the SVG namespace.
    pub fn svg(tag: impl Into<String>) -> Self {
        let mut builder = Self::new(tag);
        builder.element.namespace = Some(SVG_NAMESPACE);
        builder
    }

    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            element: self.element.with_attr(name, value),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.element.has_class(&class) {
            self.element.classes.push(class);
        }
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.element.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.element
            .children
            .extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn build(self) -> Element {
        self.element
    }
}

fn escape_attr(value: &str) -> String {
    escape(value, true)
}

fn escape_text(value: &str) -> String {
    escape(value, false)
}

fn escape(value: &str, quote: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
