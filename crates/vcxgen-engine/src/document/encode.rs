use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{Child, Node};
use crate::error::Result;

/// Cosmetic output settings. Neither changes what `decode` reads back,
/// apart from whitespace text between elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent nested elements by this many spaces.
    pub indent: Option<usize>,
    /// Emit `<?xml version="1.0" encoding="utf-8"?>` before the root.
    pub declaration: bool,
}

impl EncodeOptions {
    pub fn indented(width: usize) -> Self {
        Self {
            indent: Some(width),
            ..Self::default()
        }
    }

    pub fn with_declaration(mut self) -> Self {
        self.declaration = true;
        self
    }
}

/// Encode `node` compactly, without a declaration.
pub fn encode(node: &Node) -> Result<Vec<u8>> {
    encode_with(node, &EncodeOptions::default())
}

pub fn encode_with(node: &Node, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_to(&mut buf, node, options)?;
    Ok(buf)
}

/// Encode `node` into `sink`. The only failure source is the sink itself.
pub fn encode_to<W: Write>(sink: W, node: &Node, options: &EncodeOptions) -> Result<()> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(sink, b' ', width),
        None => Writer::new(sink),
    };

    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        if options.indent.is_none() {
            writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }
    }

    write_node(&mut writer, node)?;
    writer.into_inner().flush()?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<()> {
    let name = node.name().to_string();
    let mut start = BytesStart::new(name.as_str());
    if let Some(namespace) = node.namespace() {
        start.push_attribute(("xmlns", namespace));
    }
    for attr in node.attributes() {
        let key = attr.name.to_string();
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if node.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in node.children() {
        match child {
            Child::Element(element) => write_node(writer, element)?,
            Child::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Child::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}
