use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{cut, map, opt, recognize, value};
use nom::error::context;
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

use super::{span_between, Element, Node, Span};
use crate::error::{ChartErrorKind, XmlParseError};

pub type Resus<'a, T> = IResult<Span<'a>, T, XmlParseError<Span<'a>>>;

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

/// Element or attribute name.
pub fn xml_name(input: Span) -> Resus<Span> {
    recognize(pair(take_while1(is_name_start), take_while(is_name_char)))(input)
}

fn quoted_value(input: Span) -> Resus<Span> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

pub fn xml_attribute(input: Span) -> Resus<(String, String)> {
    let (input, key) = xml_name(input)?;
    let (input, _) = tuple((multispace0, char('='), multispace0))(input)?;
    let (input, raw_value) = context("quoted attribute value", cut(quoted_value))(input)?;

    Ok((input, (key.fragment().to_string(), unescape(raw_value.fragment()))))
}

fn comment(input: Span) -> Resus<Span> {
    recognize(tuple((tag("<!--"), take_until("-->"), tag("-->"))))(input)
}

fn processing_instruction(input: Span) -> Resus<Span> {
    recognize(tuple((tag("<?"), take_until("?>"), tag("?>"))))(input)
}

fn doctype(input: Span) -> Resus<Span> {
    recognize(tuple((tag("<!DOCTYPE"), take_until(">"), tag(">"))))(input)
}

fn cdata(input: Span) -> Resus<Span> {
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

fn text(input: Span) -> Resus<Span> {
    take_while1(|c: char| c != '<')(input)
}

/// Whitespace, comments, processing instructions and doctypes around the root element.
fn misc(input: Span) -> Resus<()> {
    value(
        (),
        many0(alt((multispace1, comment, processing_instruction, doctype))),
    )(input)
}

fn content(input: Span) -> Resus<Option<Node>> {
    alt((
        map(comment, |_| None),
        map(processing_instruction, |_| None),
        map(cdata, |data| Some(Node::Text(data.fragment().to_string()))),
        map(xml_element, |element| Some(Node::Element(element))),
        map(text, |data| Some(Node::Text(unescape(data.fragment())))),
    ))(input)
}

pub fn xml_element(input: Span) -> Resus<Element> {
    let start = input;
    let (input, _) = char('<')(input)?;
    let (input, name) = xml_name(input)?;
    let (input, attributes) = many0(preceded(multispace1, xml_attribute))(input)?;
    let (input, self_closing) = context(
        "end of start tag",
        cut(preceded(
            multispace0,
            alt((value(true, tag("/>")), value(false, tag(">")))),
        )),
    )(input)?;

    let mut element = Element {
        name: name.fragment().to_string(),
        attributes,
        children: Vec::new(),
        span: span_between(start, input),
    };

    if self_closing {
        return Ok((input, element));
    }

    let (input, children) = many0(content)(input)?;
    element.children = children.into_iter().flatten().collect();

    let (input, _) = context("closing tag", cut(tag("</")))(input)?;
    let (input, closing_name) = context("closing tag name", cut(xml_name))(input)?;
    if closing_name.fragment() != name.fragment() {
        let mut error = XmlParseError::new(
            closing_name,
            closing_name.fragment().len(),
            ChartErrorKind::MismatchedClosingTag {
                expected: name.fragment().to_string(),
                found: closing_name.fragment().to_string(),
            },
        );
        error.label = Some("this tag");
        error.help = Some("every opening tag must be closed by a tag with the same name");
        return Err(nom::Err::Failure(error));
    }
    let (input, _) = context("end of closing tag", cut(terminated(multispace0, char('>'))))(input)?;

    Ok((input, element))
}

/// Parses a whole document: optional BOM and prolog, one root element, and trailing misc.
pub fn xml_document(input: Span) -> Resus<Element> {
    let (input, _) = opt(char('\u{feff}'))(input)?;
    let (input, _) = misc(input)?;
    let (input, root) = context("root element", cut(xml_element))(input)?;
    let (input, _) = misc(input)?;

    if !input.fragment().is_empty() {
        let mut error = XmlParseError::new(input, input.fragment().len(), ChartErrorKind::TrailingContent);
        error.help = Some("a chart document has exactly one root element");
        return Err(nom::Err::Failure(error));
    }

    Ok((input, root))
}

/// Resolves predefined entities and character references. Unknown references are kept as is.
pub(crate) fn unescape(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        unescaped.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let resolved = rest
            .find(';')
            .and_then(|semi| resolve_entity(&rest[1..semi]).map(|c| (c, semi)));

        if let Some((c, semi)) = resolved {
            unescaped.push(c);
            rest = &rest[semi + 1..];
        } else {
            unescaped.push('&');
            rest = &rest[1..];
        }
    }

    unescaped.push_str(rest);
    unescaped
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let reference = entity.strip_prefix('#')?;
            let code = match reference.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => reference.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
