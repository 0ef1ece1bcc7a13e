use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::FragmentError;

/// An XML element with its namespace resolved at parse time. Attribute
/// names are kept local; the documents handled here never qualify them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given namespace and local name.
    pub fn qualified_child(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.child_elements()
            .find(|element| element.name == local && element.namespace.as_deref() == Some(namespace))
    }

    /// Depth-first search over this element and its descendants by local name.
    pub fn find_descendant(&self, local: &str) -> Option<&XmlElement> {
        if self.name == local {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.find_descendant(local))
    }

    /// Concatenated text content, descendants included.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(child) => collect_text(child, out),
        }
    }
}

/// Parses a whole document into its root element. Namespaces are resolved
/// while reading, so lookups afterwards never consult prefix declarations.
pub fn parse_document(xml: &str) -> Result<XmlElement, FragmentError> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(structure)? {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(FragmentError::Structure(
                        "multiple root elements".to_string(),
                    ));
                }
                let element = open_element(&reader, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    FragmentError::Structure("unexpected closing tag".to_string())
                })?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(structure)?.into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(value));
                }
            }
            Event::CData(cdata) => {
                let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(value));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(FragmentError::Structure(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or_else(|| FragmentError::Structure("empty document".to_string()))
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<XmlElement, FragmentError> {
    let (resolved, local) = reader.resolve_element(start.name());
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.into_inner()).into_owned()),
        _ => None,
    };
    let name = String::from_utf8_lossy(local.into_inner()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| FragmentError::Structure(err.to_string()))?;
        if attr.key.into_inner().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().into_inner()).into_owned();
        let value = attr.unescape_value().map_err(structure)?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn close_element(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), FragmentError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_some() {
                return Err(FragmentError::Structure(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn structure(err: quick_xml::Error) -> FragmentError {
    FragmentError::Structure(err.to_string())
}
