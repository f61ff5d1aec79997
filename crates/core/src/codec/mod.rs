//! Bidirectional conversion among CSV, JSON and XML text representations.
//!
//! Every format parses into the common [`Value`] model and serializes back
//! out of it, so any input format can be converted to any output format.
//! Parsing and serialization are pure and total over their error types: a
//! conversion either fully succeeds or fails as a whole with a typed error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::Value;

pub mod csv;
pub mod json;
pub mod xml;

/// A supported interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    /// MIME type hint used when exporting conversion output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            other => Err(format!(
                "unsupported format: {other}. Valid formats: csv, json, xml"
            )),
        }
    }
}

/// CSV parsing/serialization options.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter, a single ASCII character.
    pub delimiter: char,
    /// Whether the first row holds column names.
    pub has_header: bool,
    /// Whether rows whose fields are all empty are dropped while parsing.
    pub skip_empty_lines: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            skip_empty_lines: true,
        }
    }
}

/// JSON serialization options.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Indentation width in spaces; 0 emits compact output.
    pub indent: usize,
    /// Sort mapping keys lexicographically (recursively) before emitting.
    pub sort_keys: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: false,
        }
    }
}

/// XML serialization options.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Name of the document element wrapping the whole value.
    pub root_element: String,
    /// Element name wrapping each list member.
    pub item_element: String,
    /// Indentation width in spaces.
    pub indent: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root_element: "root".to_string(),
            item_element: "item".to_string(),
            indent: 2,
        }
    }
}

/// Options for all formats, bundled so conversion call sites can pass one
/// value regardless of the input/output format pair.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub csv: CsvOptions,
    pub json: JsonOptions,
    pub xml: XmlOptions,
}

/// The input text is not valid for the selected format's grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid CSV: {0}")]
    Csv(String),

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("invalid XML at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("CSV delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),
}

/// The parsed value's shape is incompatible with the requested output format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("CSV output requires a list of rows, found {0}")]
    NotRows(&'static str),

    #[error("CSV rows must be all mappings or all lists, row {index} is a {kind}")]
    RowKind { index: usize, kind: &'static str },

    #[error("CSV cell {column:?} holds a {kind}; only scalar fields can be written")]
    NestedCell { column: String, kind: &'static str },

    #[error("CSV delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),

    #[error("failed to write CSV: {0}")]
    Csv(String),

    #[error("failed to write JSON: {0}")]
    Json(String),
}

/// Parse `text` in the given format into a [`Value`].
pub fn parse(text: &str, format: Format, options: &ConvertOptions) -> Result<Value, ParseError> {
    match format {
        Format::Csv => csv::parse(text, &options.csv),
        Format::Json => json::parse(text),
        Format::Xml => xml::parse(text),
    }
}

/// Serialize a [`Value`] to text in the given format.
pub fn serialize(
    value: &Value,
    format: Format,
    options: &ConvertOptions,
) -> Result<String, SerializeError> {
    match format {
        Format::Csv => csv::serialize(value, &options.csv),
        Format::Json => json::serialize(value, &options.json),
        Format::Xml => Ok(xml::serialize(value, &options.xml)),
    }
}
