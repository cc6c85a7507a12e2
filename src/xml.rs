//! Minimal owned XML tree for `.hbxml` chart documents.

use miette::{SourceOffset, SourceSpan};
use nom_locate::LocatedSpan;

pub mod parsing;

use crate::error::ChartError;
use parsing::xml_document;

pub type Span<'a> = LocatedSpan<&'a str>;

/// Node of an element's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, with entities already resolved.
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Span of the start tag in the source document.
    pub span: SourceSpan,
}

impl Element {
    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |element| element.name == name)
    }

    /// Every element called `name` below this one, in document order.
    #[must_use]
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Concatenated text of the direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Parses a whole chart document into its root element.
///
/// # Errors
///
/// Returns a [`ChartError`] pointing at the offending location if the document is not well-formed.
pub fn parse_document(name: impl AsRef<str>, source: &str) -> Result<Element, ChartError> {
    match xml_document(Span::new(source)) {
        Ok((_, root)) => Ok(root),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            Err(ChartError::from_source_and_parse_error(name, source, e))
        }
        Err(nom::Err::Incomplete(_)) => Err(ChartError::from_source_and_parse_error(
            name,
            source,
            crate::error::XmlParseError {
                input: Span::new(source),
                len: source.len(),
                context: Some("a complete document"),
                label: None,
                help: None,
                kind: None,
            },
        )),
    }
}

pub(crate) fn span_between(start: Span, end: Span) -> SourceSpan {
    SourceSpan::new(
        SourceOffset::from(start.location_offset()),
        SourceOffset::from(end.location_offset() - start.location_offset()),
    )
}
