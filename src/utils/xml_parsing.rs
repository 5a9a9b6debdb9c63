use crate::error::XmlParseError;
use crate::models::AttributeMap;
use crate::utils::StringResultExt;
use crate::trace_fn;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A parsed XML element: tag name, attributes and element children in
/// document order. Text and comments are dropped; none of the project
/// documents carry data outside attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    pub name: String,
    pub attributes: AttributeMap,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn child(&self, index: usize) -> Option<&XmlNode> {
        self.children.get(index)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Like [`XmlNode::child`], but a missing child is a structural error in
    /// `document`.
    pub(crate) fn required_child(
        &self,
        index: usize,
        document: &'static str,
    ) -> Result<&XmlNode, XmlParseError> {
        self.child(index).ok_or_else(|| XmlParseError::InvalidStructure {
            document,
            expected: format!(
                "<{}> to have a child at index {} (found {})",
                self.name,
                index,
                self.children.len()
            ),
        })
    }

    pub(crate) fn required_attribute(
        &self,
        key: &str,
        document: &'static str,
    ) -> Result<&str, XmlParseError> {
        self.attribute(key)
            .ok_or_else(|| XmlParseError::MissingAttribute {
                document,
                tag: self.name.clone(),
                attribute: key.to_string(),
            })
    }
}

/// Reads and parses the XML document at `path` into its root element.
pub fn load_document(path: &Path) -> Result<XmlNode, XmlParseError> {
    debug!("Loading XML document {}", path.display());
    let xml_data = fs::read(path).map_err(|source| XmlParseError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&xml_data)
}

/// Builds the element tree for `xml_data` and returns its root element.
pub fn parse_document(xml_data: &[u8]) -> Result<XmlNode, XmlParseError> {
    let xml_data = xml_data.strip_prefix(UTF8_BOM).unwrap_or(xml_data);
    let mut reader = Reader::from_reader(xml_data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut open: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref event) => {
                open.push(node_from_event(event)?);
            }
            Event::Empty(ref event) => {
                let node = node_from_event(event)?;
                attach(node, &mut open, &mut root);
            }
            Event::End(ref event) => {
                let name = event.name().to_string_result()?;
                let node = open
                    .pop()
                    .ok_or_else(|| XmlParseError::UnbalancedTag(name.clone()))?;
                if node.name != name {
                    return Err(XmlParseError::UnbalancedTag(name));
                }
                attach(node, &mut open, &mut root);
            }
            Event::Eof => break,
            _ => (),
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlParseError::UnbalancedTag(unclosed.name.clone()));
    }

    let root = root.ok_or(XmlParseError::RootTagNotFound)?;
    trace_fn!(
        "parse_document",
        "Parsed <{}> with {} children",
        root.name,
        root.children.len()
    );
    Ok(root)
}

fn attach(node: XmlNode, open: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => debug!("Ignoring trailing top-level element <{}>", node.name),
    }
}

fn node_from_event(event: &BytesStart) -> Result<XmlNode, XmlParseError> {
    Ok(XmlNode {
        name: event.name().to_string_result()?,
        attributes: parse_event_attributes(event)?,
        children: Vec::new(),
    })
}

pub(crate) fn parse_event_attributes(event: &BytesStart) -> Result<AttributeMap, XmlParseError> {
    let mut attributes = AttributeMap::new();
    for attribute_result in event.attributes() {
        let attribute = attribute_result?;
        let key = attribute.key.to_string_result()?;
        let value = attribute.unescape_value()?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}
