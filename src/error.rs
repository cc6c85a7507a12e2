use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use nom::error::{ContextError, ParseError};
use thiserror::Error;

use crate::xml::Span;

#[derive(Debug, Error, Diagnostic)]
#[error("{kind}")]
pub struct ChartError {
    /// Source string for the chart file that failed to convert.
    #[source_code]
    pub input: NamedSource,

    /// Offset in bytes of the error.
    #[label("{}", label.unwrap_or("here"))]
    pub span: SourceSpan,

    /// Label text for this span. Defaults to `"here"`.
    pub label: Option<&'static str>,

    /// Suggestion for fixing the chart.
    #[help]
    pub help: Option<&'static str>,

    /// Specific error kind.
    pub kind: ChartErrorKind,
}

impl ChartError {
    pub fn from_source_and_parse_error(
        name: impl AsRef<str>,
        source: &str,
        error: XmlParseError<Span>,
    ) -> Self {
        ChartError {
            input: NamedSource::new(name, source.to_owned()),
            span: SourceSpan::new(
                SourceOffset::from(error.input.location_offset()),
                SourceOffset::from(error.len),
            ),
            label: error.label,
            help: error.help,
            kind: match (error.kind, error.context) {
                (Some(kind), _) => kind,
                (None, Some(context)) => ChartErrorKind::Context(context),
                (None, None) => ChartErrorKind::Other,
            },
        }
    }

    pub fn from_source_and_read_error(name: impl AsRef<str>, source: &str, error: ReadError) -> Self {
        ChartError {
            input: NamedSource::new(name, source.to_owned()),
            span: error.span,
            label: error.label,
            help: error.help,
            kind: error.kind,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error, Diagnostic)]
pub enum ChartErrorKind {
    #[error("Missing required <{0}> section")]
    #[diagnostic(code(hbxml::missing_required_section))]
    MissingRequiredSection(&'static str),

    #[error("Attribute {attribute:?} of <{element}> is not a valid number: {value:?}")]
    #[diagnostic(code(hbxml::malformed_numeric_field))]
    MalformedNumericField {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("Unsupported hit object type ({0:?})")]
    #[diagnostic(code(hbxml::unsupported_object_kind))]
    UnsupportedObjectKind(String),

    #[error("Closing tag </{found}> does not match <{expected}>")]
    #[diagnostic(code(hbxml::xml::mismatched_closing_tag))]
    MismatchedClosingTag { expected: String, found: String },

    #[error("Unexpected content after the root element")]
    #[diagnostic(code(hbxml::xml::trailing_content))]
    TrailingContent,

    /// Generic parsing error. The given context string denotes the component
    /// that failed to parse.
    #[error("Expected {0}.")]
    #[diagnostic(code(hbxml::xml::parse_component))]
    Context(&'static str),

    /// Generic unspecified error. If this is returned, the call site should
    /// be annotated with context, if possible.
    #[error("An unspecified error occurred")]
    #[diagnostic(code(hbxml::other))]
    Other,
}

/// Error raised while converting a chart file on disk.
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertFileError {
    #[error("Could not read {}", .path.display())]
    #[diagnostic(code(hbxml::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Chart(#[from] ChartError),
}

/// Error raised while building the chart model from an already parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadError {
    /// Span of the start tag of the offending element.
    pub span: SourceSpan,
    pub label: Option<&'static str>,
    pub help: Option<&'static str>,
    pub kind: ChartErrorKind,
}

impl ReadError {
    pub fn new(span: SourceSpan, kind: ChartErrorKind) -> Self {
        Self {
            span,
            label: None,
            help: None,
            kind,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlParseError<I> {
    pub input: I,
    pub len: usize,
    pub context: Option<&'static str>,
    pub label: Option<&'static str>,
    pub help: Option<&'static str>,
    pub kind: Option<ChartErrorKind>,
}

impl<I> XmlParseError<I> {
    pub fn new(input: I, len: usize, kind: ChartErrorKind) -> Self {
        Self {
            input,
            len,
            context: None,
            label: None,
            help: None,
            kind: Some(kind),
        }
    }
}

impl<I> ParseError<I> for XmlParseError<I> {
    fn from_error_kind(input: I, _kind: nom::error::ErrorKind) -> Self {
        Self {
            input,
            len: 0,
            label: None,
            help: None,
            context: None,
            kind: None,
        }
    }

    fn append(_input: I, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I> ContextError<I> for XmlParseError<I> {
    fn add_context(_input: I, ctx: &'static str, mut other: Self) -> Self {
        other.context = other.context.or(Some(ctx));
        other
    }
}
