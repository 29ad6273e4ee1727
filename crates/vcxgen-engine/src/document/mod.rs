//! # Document Model
//!
//! An owned, order-preserving XML element tree that decodes a template and
//! encodes it back without disturbing anything it does not understand.
//!
//! ## Shape
//!
//! - [`Node`]: one element with a [`QName`], an ordered attribute list and an
//!   ordered list of [`Child`]ren
//! - [`Child`]: exactly one of `Element`, `Text` or `Comment`
//!
//! Attributes live in a `Vec`, not a map: duplicates are kept and lookup by
//! name is a linear scan returning the first hit.
//!
//! ## Modules
//!
//! - **`decode`**: bytes to [`Node`] via the `quick-xml` event reader
//! - **`encode`**: [`Node`] to bytes via the `quick-xml` writer
//!
//! ## Key Invariants
//!
//! - Child and attribute order is exactly insertion (or document) order
//! - `encode(decode(encode(tree))) == encode(tree)` for element, attribute,
//!   text and comment content
//! - The tree is strictly owned: no parent links, no sharing between trees

mod decode;
mod encode;

pub use decode::decode;
pub use encode::{EncodeOptions, encode, encode_to, encode_with};

use std::fmt;

/// An element or attribute name as written: optional prefix plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// Split a raw `prefix:local` name. Names without a colon have no prefix.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            None => Self::local(raw),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// One entry in an element's mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(Node),
    /// Unescaped character data. Escaping happens in the encoder.
    Text(String),
    /// Raw comment body, without the `<!--` `-->` delimiters.
    Comment(String),
}

impl Child {
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) | Child::Comment(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Node> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) | Child::Comment(_) => None,
        }
    }
}

/// An element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: QName,
    /// Default namespace declared by this element, written as `xmlns="..."`.
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<Child>,
}

impl Node {
    pub fn new(local: impl Into<String>) -> Self {
        Self::with_name(QName::local(local))
    }

    pub fn with_name(name: QName) -> Self {
        Self {
            name,
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element that declares `namespace` as its default namespace.
    pub fn with_namespace(local: impl Into<String>, namespace: impl Into<String>) -> Self {
        let mut node = Self::new(local);
        node.namespace = Some(namespace.into());
        node
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub(crate) fn strip_prefix(&mut self) {
        self.name.prefix = None;
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Value of the first attribute whose local name is `local`.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    pub fn first_attribute(&self) -> Option<&Attribute> {
        self.attributes.first()
    }

    /// Element children in document order, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut().filter_map(Child::as_element_mut)
    }

    /// Append an empty element child and return it for population.
    pub fn add_child(&mut self, local: impl Into<String>) -> &mut Node {
        self.push_element(Node::new(local))
    }

    pub(crate) fn push_element(&mut self, node: Node) -> &mut Node {
        self.children.push(Child::Element(node));
        match self.children.last_mut() {
            Some(Child::Element(node)) => node,
            _ => unreachable!("element was just pushed"),
        }
    }

    /// Append an attribute. Existing attributes with the same name are kept.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push_attribute(QName::parse(&name.into()), value);
    }

    pub(crate) fn push_attribute(&mut self, name: QName, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name,
            value: value.into(),
        });
    }

    pub fn add_text(&mut self, value: impl Into<String>) {
        self.children.push(Child::Text(value.into()));
    }

    pub fn add_comment(&mut self, value: impl Into<String>) {
        self.children.push(Child::Comment(value.into()));
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Text(text) => Some(text.as_str()),
                Child::Element(_) | Child::Comment(_) => None,
            })
            .collect()
    }
}
