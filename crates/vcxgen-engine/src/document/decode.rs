use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Node, QName};
use crate::error::{Error, Result};

/// Decode a complete document into its root element.
///
/// Comments, text and processing instructions outside the root element are
/// dropped, as are declarations, processing instructions and DOCTYPEs inside
/// it. A second element after the root is an error. CDATA sections become
/// plain text children. The root element loses its prefix.
pub fn decode(bytes: &[u8]) -> Result<Node> {
    let text = utf8(bytes)?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().expand_empty_elements = true;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut root = element_from_start(&start)?;
                root.strip_prefix();
                decode_children(&mut reader, &mut root)?;
                finish(&mut reader)?;
                return Ok(root);
            }
            Event::Empty(start) => {
                let mut root = element_from_start(&start)?;
                root.strip_prefix();
                finish(&mut reader)?;
                return Ok(root);
            }
            Event::Eof => {
                return Err(Error::MalformedDocument(
                    "document has no root element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Consume events up to and including the end tag of `node`.
fn decode_children(reader: &mut Reader<&[u8]>, node: &mut Node) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut child = element_from_start(&start)?;
                decode_children(reader, &mut child)?;
                node.push_element(child);
            }
            Event::Empty(start) => {
                node.push_element(element_from_start(&start)?);
            }
            Event::End(_) => return Ok(()),
            Event::Text(text) => node.add_text(text.unescape()?),
            Event::CData(data) => node.add_text(utf8(&data)?),
            Event::Comment(comment) => node.add_comment(utf8(&comment)?),
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => {
                return Err(Error::MalformedDocument(format!(
                    "unexpected end of input inside <{}>",
                    node.name()
                )));
            }
        }
    }
}

/// Read the rest of the input after the root element has closed.
fn finish(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(start) | Event::Empty(start) => {
                return Err(Error::MalformedDocument(format!(
                    "unexpected <{}> after the root element",
                    utf8(start.name().as_ref())?
                )));
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Node> {
    let mut node = Node::with_name(QName::parse(utf8(start.name().as_ref())?));

    // Duplicate attribute names are part of the model.
    let mut attributes = start.attributes();
    attributes.with_checks(false);
    for attr in attributes {
        let attr = attr?;
        let name = QName::parse(utf8(attr.key.as_ref())?);
        node.push_attribute(name, attr.unescape_value()?);
    }

    Ok(node)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|err| Error::MalformedDocument(format!("invalid UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Child;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_mixed_content_in_order() {
        let root = decode(b"<Root>a<X/>b<!--c--></Root>").unwrap();

        assert_eq!(
            root.children(),
            &[
                Child::Text("a".to_string()),
                Child::Element(Node::new("X")),
                Child::Text("b".to_string()),
                Child::Comment("c".to_string()),
            ]
        );
    }

    #[test]
    fn attributes_keep_document_order() {
        let root = decode(br#"<Root b="2" a="1" c="3"/>"#).unwrap();

        let names: Vec<_> = root
            .attributes()
            .iter()
            .map(|attr| attr.name.local.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn entities_are_unescaped() {
        let root = decode(br#"<Root v="a &amp; b">x &lt; y</Root>"#).unwrap();

        assert_eq!(root.attribute("v"), Some("a & b"));
        assert_eq!(root.text(), "x < y");
    }

    #[test]
    fn root_prefix_is_dropped_but_children_keep_theirs() {
        let root = decode(br#"<m:Project xmlns:m="urn:x"><m:ItemGroup/></m:Project>"#).unwrap();

        assert_eq!(root.name(), &QName::local("Project"));
        assert_eq!(root.attribute("m"), Some("urn:x"));
        let child = root.elements().next().unwrap();
        assert_eq!(child.name().to_string(), "m:ItemGroup");
    }

    #[test]
    fn declaration_and_processing_instructions_are_dropped() {
        let root =
            decode(b"<?xml version=\"1.0\"?>\n<!-- lead --><Root><?pi x?><A/></Root>").unwrap();

        assert_eq!(root.children().len(), 1);
        assert_eq!(root.elements().next().unwrap().local_name(), "A");
    }

    #[test]
    fn cdata_becomes_text() {
        let root = decode(b"<Root><![CDATA[a < b]]></Root>").unwrap();
        assert_eq!(root.children(), &[Child::Text("a < b".to_string())]);
    }

    #[test]
    fn unterminated_element_is_malformed() {
        let err = decode(b"<Root><Child>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let err = decode(b"<Root><A></B></Root>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn second_element_after_root_is_malformed() {
        let err = decode(b"<A/><B><C>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
        assert!(err.to_string().contains("<B>"));
    }

    #[test]
    fn trailing_comments_and_whitespace_are_accepted() {
        let root = decode(b"<Root><A/></Root>\n<!-- trailer -->\n").unwrap();

        assert_eq!(root.local_name(), "Root");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = decode(b"<Root>\xff</Root>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn empty_input_has_no_root() {
        let err = decode(b"  \n").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }
}
