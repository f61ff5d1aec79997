//! JSON to/from [`Value`].
//!
//! Parsing accepts anything the standard grammar accepts; serialization
//! supports a configurable indent width and optional key sorting. Mapping
//! keys otherwise keep their insertion order.

use serde::Serialize;

use crate::codec::{JsonOptions, ParseError, SerializeError};
use crate::value::Value;

pub fn parse(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(|err| ParseError::Json(err.to_string()))
}

pub fn serialize(value: &Value, options: &JsonOptions) -> Result<String, SerializeError> {
    let value = if options.sort_keys {
        value.sorted()
    } else {
        value.clone()
    };

    if options.indent == 0 {
        return serde_json::to_string(&value).map_err(|err| SerializeError::Json(err.to_string()));
    }

    let indent = " ".repeat(options.indent);
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| SerializeError::Json(err.to_string()))?;
    String::from_utf8(out).map_err(|err| SerializeError::Json(err.to_string()))
}
