//! XML to/from [`Value`].
//!
//! The mapping rule: each element becomes a mapping; attributes go under the
//! reserved [`ATTRIBUTES_KEY`] as a flat string-to-string mapping; a child
//! tag name that recurs among siblings collects into a list; an element with
//! no child elements and non-blank text becomes that trimmed text; an
//! element with no children and blank text becomes null. Mixed
//! text-and-element content drops the text in favour of the child mapping
//! (known limitation).

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::codec::{ParseError, XmlOptions};
use crate::value::Value;

/// Reserved mapping key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";

struct Frame {
    name: String,
    map: IndexMap<String, Value>,
    has_children: bool,
    text: String,
}

fn err_at(position: usize, message: impl Into<String>) -> ParseError {
    ParseError::Xml {
        position,
        message: message.into(),
    }
}

fn open_frame(start: &BytesStart, position: usize) -> Result<Frame, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = IndexMap::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| err_at(position, err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| err_at(position, err.to_string()))?
            .into_owned();
        attributes.insert(key, Value::String(value));
    }

    let mut map = IndexMap::new();
    if !attributes.is_empty() {
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Map(attributes));
    }

    Ok(Frame {
        name,
        map,
        has_children: false,
        text: String::new(),
    })
}

fn close_frame(frame: Frame) -> (String, Value) {
    let text = frame.text.trim();
    let value = if !frame.has_children && !text.is_empty() {
        Value::String(text.to_string())
    } else if frame.map.is_empty() {
        Value::Null
    } else {
        Value::Map(frame.map)
    };
    (frame.name, value)
}

fn insert_child(map: &mut IndexMap<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::Null);
            *existing = Value::List(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Err(err) => return Err(err_at(position, err.to_string())),
            Ok(Event::Start(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(err_at(position, "document has more than one root element"));
                }
                stack.push(open_frame(&start, position)?);
            }
            Ok(Event::Empty(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(err_at(position, "document has more than one root element"));
                }
                let (name, value) = close_frame(open_frame(&start, position)?);
                match stack.last_mut() {
                    Some(parent) => {
                        parent.has_children = true;
                        insert_child(&mut parent.map, name, value);
                    }
                    None => root = Some(value),
                }
            }
            Ok(Event::End(end)) => {
                let closing = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let Some(frame) = stack.pop() else {
                    return Err(err_at(
                        position,
                        format!("close tag </{closing}> without an open element"),
                    ));
                };
                if frame.name != closing {
                    return Err(err_at(
                        position,
                        format!("expected </{}>, found </{closing}>", frame.name),
                    ));
                }
                let (name, value) = close_frame(frame);
                match stack.last_mut() {
                    Some(parent) => {
                        parent.has_children = true;
                        insert_child(&mut parent.map, name, value);
                    }
                    None => root = Some(value),
                }
            }
            Ok(Event::Text(content)) => {
                let content = content
                    .unescape()
                    .map_err(|err| err_at(position, err.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&content),
                    None if content.trim().is_empty() => {}
                    None => return Err(err_at(position, "text content outside of root element")),
                }
            }
            Ok(Event::CData(content)) => {
                let content = String::from_utf8_lossy(&content.into_inner()).into_owned();
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&content),
                    None if content.trim().is_empty() => {}
                    None => return Err(err_at(position, "text content outside of root element")),
                }
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
        }
    }

    if let Some(frame) = stack.last() {
        return Err(err_at(
            text.len(),
            format!("unexpected end of document, <{}> is not closed", frame.name),
        ));
    }
    root.ok_or_else(|| err_at(text.len(), "document has no root element"))
}

/// Replace characters that are not valid in an XML name with `_`. A name
/// that would start with a digit or hyphen gets a leading `_` so the output
/// stays well-formed.
fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        sanitized.push('_');
    }
    if sanitized.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        sanitized.insert(0, '_');
    }
    sanitized
}

fn escape(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// Attribute string for an element whose mapping carries [`ATTRIBUTES_KEY`],
/// plus the remaining child entries.
fn split_attributes(map: &IndexMap<String, Value>) -> (String, Vec<(&String, &Value)>) {
    let mut attributes = String::new();
    let mut children = Vec::new();
    for (key, value) in map {
        match (key.as_str(), value) {
            (ATTRIBUTES_KEY, Value::Map(attrs)) => {
                for (name, attr) in attrs {
                    let text = attr.scalar_text().unwrap_or_default();
                    attributes.push_str(&format!(" {}=\"{}\"", sanitize_name(name), escape(&text)));
                }
            }
            _ => children.push((key, value)),
        }
    }
    (attributes, children)
}

fn write_named(out: &mut String, name: &str, value: &Value, options: &XmlOptions, level: usize) {
    let pad = " ".repeat(options.indent * level);
    match value {
        Value::Null => out.push_str(&format!("{pad}<{name}/>\n")),
        Value::Map(map) => {
            let (attributes, children) = split_attributes(map);
            if children.is_empty() {
                out.push_str(&format!("{pad}<{name}{attributes}/>\n"));
                return;
            }
            out.push_str(&format!("{pad}<{name}{attributes}>\n"));
            for (key, child) in children {
                let key = sanitize_name(key);
                match child {
                    // A list under a key becomes repeated sibling elements,
                    // the inverse of the parse rule.
                    Value::List(items) => {
                        for item in items {
                            write_named(out, &key, item, options, level + 1);
                        }
                    }
                    other => write_named(out, &key, other, options, level + 1),
                }
            }
            out.push_str(&format!("{pad}</{name}>\n"));
        }
        Value::List(items) => {
            let item_element = sanitize_name(&options.item_element);
            if items.is_empty() {
                out.push_str(&format!("{pad}<{name}/>\n"));
                return;
            }
            out.push_str(&format!("{pad}<{name}>\n"));
            for item in items {
                write_named(out, &item_element, item, options, level + 1);
            }
            out.push_str(&format!("{pad}</{name}>\n"));
        }
        scalar => {
            let text = scalar.scalar_text().unwrap_or_default();
            out.push_str(&format!("{pad}<{name}>{}</{name}>\n", escape(&text)));
        }
    }
}

pub fn serialize(value: &Value, options: &XmlOptions) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_named(&mut out, &sanitize_name(&options.root_element), value, options, 0);
    out.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::XmlOptions;

    fn options() -> XmlOptions {
        XmlOptions::default()
    }

    fn entry<'a>(value: &'a Value, key: &str) -> &'a Value {
        let Value::Map(map) = value else {
            panic!("expected a mapping, got {}", value.kind());
        };
        &map[key]
    }

    #[test]
    fn test_parse_leaf_text() {
        let value = parse("<root><name>Ada</name></root>").unwrap();
        assert_eq!(entry(&value, "name"), &Value::from("Ada"));
    }

    #[test]
    fn test_parse_repeated_siblings_become_a_list() {
        let value = parse("<root><a>1</a><a>2</a><b>x</b></root>").unwrap();
        assert_eq!(
            entry(&value, "a"),
            &Value::List(vec![Value::from("1"), Value::from("2")])
        );
        assert_eq!(entry(&value, "b"), &Value::from("x"));
    }

    #[test]
    fn test_parse_attributes_under_reserved_key() {
        let value = parse(r#"<root><a id="7"><b>x</b></a></root>"#).unwrap();
        let a = entry(&value, "a");
        let attrs = entry(a, ATTRIBUTES_KEY);
        assert_eq!(entry(attrs, "id"), &Value::from("7"));
        assert_eq!(entry(a, "b"), &Value::from("x"));
    }

    #[test]
    fn test_parse_empty_element_is_null() {
        let value = parse("<root><a/><b>   </b></root>").unwrap();
        assert_eq!(entry(&value, "a"), &Value::Null);
        assert_eq!(entry(&value, "b"), &Value::Null);
    }

    #[test]
    fn test_parse_mixed_content_drops_text() {
        let value = parse("<root><a>hello<b>x</b></a></root>").unwrap();
        let a = entry(&value, "a");
        assert_eq!(entry(a, "b"), &Value::from("x"));
        let Value::Map(map) = a else { unreachable!() };
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let value = parse("<root><a>fish &amp; chips</a></root>").unwrap();
        assert_eq!(entry(&value, "a"), &Value::from("fish & chips"));
    }

    #[test]
    fn test_parse_ignores_declaration_and_comments() {
        let value =
            parse("<?xml version=\"1.0\"?><!-- hi --><root><a>1</a></root>").unwrap();
        assert_eq!(entry(&value, "a"), &Value::from("1"));
    }

    #[test]
    fn test_parse_mismatched_tags_is_an_error() {
        let err = parse("<root><a>1</b></root>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }

    #[test]
    fn test_parse_unclosed_element_is_an_error() {
        let err = parse("<root><a>1</a>").unwrap_err();
        let ParseError::Xml { message, .. } = err else {
            unreachable!();
        };
        assert!(message.contains("<root>"));
    }

    #[test]
    fn test_parse_empty_document_is_an_error() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_serialize_scalar_mapping() {
        let value = crate::codec::json::parse(r#"{"name":"Ada","age":36}"#).unwrap();
        let xml = serialize(&value, &options());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<name>Ada</name>"));
        assert!(xml.contains("<age>36</age>"));
    }

    #[test]
    fn test_serialize_wraps_list_items() {
        let value = crate::codec::json::parse(r#"["a","b"]"#).unwrap();
        let xml = serialize(&value, &options());
        assert!(xml.contains("<item>a</item>"));
        assert!(xml.contains("<item>b</item>"));
    }

    #[test]
    fn test_serialize_escapes_special_characters() {
        let value = crate::codec::json::parse(r#"{"a":"<fish> & \"chips\""}"#).unwrap();
        let xml = serialize(&value, &options());
        assert!(xml.contains("&lt;fish&gt; &amp; &quot;chips&quot;"));
    }

    #[test]
    fn test_serialize_sanitizes_element_names() {
        let value = crate::codec::json::parse(r#"{"first name":"Ada","1st":"x"}"#).unwrap();
        let xml = serialize(&value, &options());
        assert!(xml.contains("<first_name>Ada</first_name>"));
        assert!(xml.contains("<_1st>x</_1st>"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let value = parse("<root><a>1</a><a>2</a><b>x</b></root>").unwrap();
        let xml = serialize(&value, &options());
        let reparsed = parse(&xml).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn test_round_trip_preserves_attributes() {
        let value = parse(r#"<root><a id="7"><b>x</b></a></root>"#).unwrap();
        let xml = serialize(&value, &options());
        assert_eq!(parse(&xml).unwrap(), value);
    }
}
