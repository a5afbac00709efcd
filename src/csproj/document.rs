//! In-memory XML tree for generated project files
//!
//! The tree is built from `quick_xml` reader events and written back with a
//! `quick_xml` writer. Whitespace-only text between elements is dropped on parse,
//! the writer re-indents, so parse -> serialize -> parse gives an equal tree.

use std::borrow::Cow;
use quick_xml::escape::{partial_escape, resolve_predefined_entity, unescape};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesRef, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use crate::error::{ProjectFileError, ProjectFileResult};

/// A node inside an element or around the root element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Unescaped character data
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

/// An element with its attributes (in document order) and child nodes
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an empty element. `name` is the qualified name as written, e.g. `PropertyGroup` or `msb:PropertyGroup`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Looks up an attribute by local name, ignoring namespace declarations
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|(key, _)| !is_namespace_declaration(key))
            .find(|(key, _)| local_part(key) == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// Looks up an attribute by its exact qualified name
    pub fn raw_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing the value in place if it already exists
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text and CDATA content of the direct children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Appends a child element as the last child node
    pub fn push_child(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Inserts a child element before the first child node
    pub fn push_front_child(&mut self, element: XmlElement) {
        self.children.insert(0, XmlNode::Element(element));
    }

    /// All descendant elements in document order, not including `self`
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        collect_descendants(self, &mut found);
        found
    }

    /// Finds the first descendant (document order) for which `predicate(parent, child)` holds.
    ///
    /// Returns the child-node indices leading from `self` to the match, for use with
    /// [`XmlElement::element_at_path_mut`].
    pub fn find_descendant_path<P>(&self, predicate: &P) -> Option<Vec<usize>>
    where
        P: Fn(&XmlElement, &XmlElement) -> bool,
    {
        for (index, node) in self.children.iter().enumerate() {
            if let XmlNode::Element(child) = node {
                if predicate(self, child) {
                    return Some(vec![index]);
                }
                if let Some(mut path) = child.find_descendant_path(predicate) {
                    path.insert(0, index);
                    return Some(path);
                }
            }
        }
        None
    }

    pub fn element_at_path_mut(&mut self, path: &[usize]) -> Option<&mut XmlElement> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match self.children.get_mut(*first) {
            Some(XmlNode::Element(child)) => child.element_at_path_mut(rest),
            _ => None,
        }
    }

    /// Calls `visitor` on every descendant element in document order.
    ///
    /// Children appended by the visitor are visited as well.
    pub fn visit_descendants_mut<F>(&mut self, visitor: &mut F)
    where
        F: FnMut(&mut XmlElement),
    {
        for child in self.child_elements_mut() {
            visitor(child);
            child.visit_descendants_mut(visitor);
        }
    }

    /// Drops whitespace-only text nodes from an element that has element children
    fn drop_insignificant_whitespace(&mut self) {
        let has_elements = self.children.iter().any(|node| matches!(node, XmlNode::Element(_)));
        if has_elements {
            self.children.retain(|node| match node {
                XmlNode::Text(text) => !text.trim().is_empty(),
                _ => true,
            });
        }
    }
}

fn collect_descendants<'a>(element: &'a XmlElement, found: &mut Vec<&'a XmlElement>) {
    for child in element.child_elements() {
        found.push(child);
        collect_descendants(child, found);
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// A parsed project file: the root element plus the nodes around it
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    prolog: Vec<XmlNode>,
    root: XmlElement,
    epilog: Vec<XmlNode>,
}

impl ProjectDocument {
    /// Parses project text. Fails if the text is not well-formed XML with exactly one root element.
    pub fn parse(content: &str) -> ProjectFileResult<Self> {
        let mut reader = Reader::from_str(content);
        let mut builder = TreeBuilder::default();

        loop {
            match reader.read_event()? {
                // The declaration is always rewritten on serialize
                Event::Decl(_) => {}
                Event::Start(e) => builder.open(element_from_start(&e)?),
                Event::Empty(e) => builder.push_node(XmlNode::Element(element_from_start(&e)?))?,
                Event::End(_) => builder.close()?,
                Event::Text(e) => {
                    let raw = utf8(&e)?;
                    let text = unescape(raw).map_err(xml_error)?;
                    builder.push_text(&text)?;
                }
                Event::GeneralRef(e) => builder.push_text(&resolve_reference(&e)?)?,
                Event::CData(e) => builder.push_node(XmlNode::CData(utf8(&e)?.to_string()))?,
                Event::Comment(e) => builder.push_node(XmlNode::Comment(utf8(&e)?.to_string()))?,
                Event::PI(e) => builder.push_node(XmlNode::ProcessingInstruction(utf8(&e)?.to_string()))?,
                Event::DocType(e) => builder.push_node(XmlNode::DocType(utf8(&e)?.to_string()))?,
                Event::Eof => break,
            }
        }

        builder.finish()
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// The namespace URI bound to the root element's prefix (the default namespace if unprefixed)
    pub fn namespace(&self) -> Option<&str> {
        match self.root.prefix() {
            Some(prefix) => self.root.raw_attribute(&format!("xmlns:{}", prefix)),
            None => self.root.raw_attribute("xmlns"),
        }
    }

    /// Creates an element in the root element's namespace
    pub fn create_element(&self, local_name: &str) -> XmlElement {
        match self.root.prefix() {
            Some(prefix) => XmlElement::new(format!("{}:{}", prefix, local_name)),
            None => XmlElement::new(local_name),
        }
    }

    /// Creates an element in the root element's namespace holding `text`
    pub fn create_text_element(&self, local_name: &str, text: &str) -> XmlElement {
        let mut element = self.create_element(local_name);
        element.set_text(text);
        element
    }

    /// Renders the document as UTF-8 text with an `encoding="utf-8"` declaration
    pub fn serialize(&self) -> ProjectFileResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }

        String::from_utf8(writer.into_inner()).map_err(|e| ProjectFileError::Encoding {
            message: e.to_string(),
        })
    }
}

#[derive(Default)]
struct TreeBuilder {
    prolog: Vec<XmlNode>,
    open_elements: Vec<XmlElement>,
    root: Option<XmlElement>,
    epilog: Vec<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, element: XmlElement) {
        self.open_elements.push(element);
    }

    fn close(&mut self) -> ProjectFileResult<()> {
        let mut element = self.open_elements.pop().ok_or_else(|| ProjectFileError::XmlParsing {
            message: "closing tag without matching opening tag".to_string(),
        })?;
        element.drop_insignificant_whitespace();
        self.push_node(XmlNode::Element(element))
    }

    fn push_node(&mut self, node: XmlNode) -> ProjectFileResult<()> {
        if let Some(parent) = self.open_elements.last_mut() {
            parent.children.push(node);
            return Ok(());
        }

        match node {
            XmlNode::Element(element) => {
                if self.root.is_some() {
                    return Err(ProjectFileError::XmlParsing {
                        message: format!("unexpected second root element <{}>", element.name()),
                    });
                }
                self.root = Some(element);
            }
            XmlNode::Text(text) => {
                if !text.trim().is_empty() {
                    return Err(ProjectFileError::XmlParsing {
                        message: "text outside the root element".to_string(),
                    });
                }
            }
            other if self.root.is_none() => self.prolog.push(other),
            other => self.epilog.push(other),
        }
        Ok(())
    }

    /// Appends text, merging with a directly preceding text node
    fn push_text(&mut self, text: &str) -> ProjectFileResult<()> {
        if let Some(parent) = self.open_elements.last_mut() {
            if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
                existing.push_str(text);
                return Ok(());
            }
        }
        self.push_node(XmlNode::Text(text.to_string()))
    }

    fn finish(self) -> ProjectFileResult<ProjectDocument> {
        if let Some(unclosed) = self.open_elements.last() {
            return Err(ProjectFileError::XmlParsing {
                message: format!("unclosed element <{}>", unclosed.name()),
            });
        }
        let root = self.root.ok_or(ProjectFileError::MissingRoot)?;
        Ok(ProjectDocument {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn element_from_start(start: &BytesStart) -> ProjectFileResult<XmlElement> {
    let mut element = XmlElement::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = utf8(attr.key.as_ref())?;
        let value = unescape(utf8(&attr.value)?).map_err(xml_error)?;
        element.attributes.push((key.to_string(), value.into_owned()));
    }
    Ok(element)
}

fn resolve_reference(reference: &BytesRef) -> ProjectFileResult<String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(xml_error)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(xml_error)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| ProjectFileError::XmlParsing {
            message: format!("unknown entity &{};", name),
        })
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> ProjectFileResult<()> {
    match node {
        XmlNode::Element(element) => write_element(writer, element)?,
        XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        XmlNode::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        XmlNode::Comment(text) => writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?,
        XmlNode::ProcessingInstruction(text) => writer.write_event(Event::PI(BytesPI::new(text.as_str())))?,
        XmlNode::DocType(text) => writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?,
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> ProjectFileResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute_value(value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Escapes an attribute value for a double-quoted attribute.
///
/// Apostrophes stay literal so MSBuild conditions such as `'$(Configuration)' == 'Debug'` remain readable.
fn escape_attribute_value(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}

fn utf8(bytes: &[u8]) -> ProjectFileResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ProjectFileError::Encoding {
        message: e.to_string(),
    })
}

fn xml_error(err: impl std::fmt::Display) -> ProjectFileError {
    ProjectFileError::XmlParsing {
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
