//! CSV to/from [`Value`].
//!
//! Header mode yields a list of mappings keyed by the trimmed header names;
//! non-header mode yields a list of lists of trimmed field strings. Fields
//! always parse as strings; no numeric coercion happens here.

use indexmap::IndexMap;

use crate::codec::{CsvOptions, ParseError, SerializeError};
use crate::value::Value;

fn delimiter_byte(delimiter: char) -> Option<u8> {
    delimiter.is_ascii().then_some(delimiter as u8)
}

#[derive(PartialEq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteClosed,
}

/// The record reader recovers from malformed quoting instead of reporting
/// it, so quoting is checked up front: a quoted field must be terminated,
/// and nothing but a delimiter or line break may follow its closing quote.
fn validate_quoting(text: &str, delimiter: char) -> Result<(), ParseError> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1usize;
    let mut quote_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            QuoteState::FieldStart => {
                if c == '"' {
                    state = QuoteState::Quoted;
                    quote_line = line;
                } else if c == '\n' {
                    line += 1;
                } else if c != delimiter && c != '\r' {
                    state = QuoteState::Unquoted;
                }
            }
            QuoteState::Unquoted => {
                if c == delimiter {
                    state = QuoteState::FieldStart;
                } else if c == '\n' {
                    line += 1;
                    state = QuoteState::FieldStart;
                }
            }
            QuoteState::Quoted => {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                    } else {
                        state = QuoteState::QuoteClosed;
                    }
                } else if c == '\n' {
                    line += 1;
                }
            }
            QuoteState::QuoteClosed => {
                if c == delimiter {
                    state = QuoteState::FieldStart;
                } else if c == '\n' {
                    line += 1;
                    state = QuoteState::FieldStart;
                } else if c != '\r' {
                    return Err(ParseError::Csv(format!(
                        "unexpected character after closing quote on line {line}"
                    )));
                }
            }
        }
    }

    if state == QuoteState::Quoted {
        return Err(ParseError::Csv(format!(
            "unterminated quoted field starting on line {quote_line}"
        )));
    }
    Ok(())
}

pub fn parse(text: &str, options: &CsvOptions) -> Result<Value, ParseError> {
    let delimiter =
        delimiter_byte(options.delimiter).ok_or(ParseError::Delimiter(options.delimiter))?;
    validate_quoting(text, options.delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(options.has_header)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Option<Vec<String>> = if options.has_header {
        let headers = reader
            .headers()
            .map_err(|err| ParseError::Csv(err.to_string()))?;
        Some(headers.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ParseError::Csv(err.to_string()))?;
        if options.skip_empty_lines && record.iter().all(str::is_empty) {
            continue;
        }

        match &headers {
            Some(headers) => {
                let mut row = IndexMap::new();
                for (index, header) in headers.iter().enumerate() {
                    let field = record.get(index).unwrap_or_default();
                    row.insert(header.clone(), Value::String(field.to_string()));
                }
                rows.push(Value::Map(row));
            }
            None => {
                let fields = record
                    .iter()
                    .map(|field| Value::String(field.to_string()))
                    .collect();
                rows.push(Value::List(fields));
            }
        }
    }

    Ok(Value::List(rows))
}

pub fn serialize(value: &Value, options: &CsvOptions) -> Result<String, SerializeError> {
    let rows = match value {
        Value::List(rows) => rows,
        other => return Err(SerializeError::NotRows(other.kind())),
    };
    let delimiter =
        delimiter_byte(options.delimiter).ok_or(SerializeError::Delimiter(options.delimiter))?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    match rows.first() {
        Some(Value::Map(_)) => {
            // Column set is the union of row keys in first-seen order.
            let mut columns: Vec<String> = Vec::new();
            for row in rows {
                if let Value::Map(map) = row {
                    for key in map.keys() {
                        if !columns.iter().any(|column| column == key) {
                            columns.push(key.clone());
                        }
                    }
                }
            }

            if options.has_header {
                writer
                    .write_record(&columns)
                    .map_err(|err| SerializeError::Csv(err.to_string()))?;
            }

            for (index, row) in rows.iter().enumerate() {
                let Value::Map(map) = row else {
                    return Err(SerializeError::RowKind {
                        index,
                        kind: row.kind(),
                    });
                };
                let mut record = Vec::with_capacity(columns.len());
                for column in &columns {
                    record.push(match map.get(column) {
                        Some(cell) => {
                            cell.scalar_text().ok_or_else(|| SerializeError::NestedCell {
                                column: column.clone(),
                                kind: cell.kind(),
                            })?
                        }
                        None => String::new(),
                    });
                }
                writer
                    .write_record(&record)
                    .map_err(|err| SerializeError::Csv(err.to_string()))?;
            }
        }
        Some(Value::List(_)) => {
            for (index, row) in rows.iter().enumerate() {
                let Value::List(fields) = row else {
                    return Err(SerializeError::RowKind {
                        index,
                        kind: row.kind(),
                    });
                };
                let mut record = Vec::with_capacity(fields.len());
                for (column, cell) in fields.iter().enumerate() {
                    record.push(cell.scalar_text().ok_or_else(|| {
                        SerializeError::NestedCell {
                            column: column.to_string(),
                            kind: cell.kind(),
                        }
                    })?);
                }
                writer
                    .write_record(&record)
                    .map_err(|err| SerializeError::Csv(err.to_string()))?;
            }
        }
        Some(other) => {
            return Err(SerializeError::RowKind {
                index: 0,
                kind: other.kind(),
            });
        }
        None => {}
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| SerializeError::Csv(err.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|err| SerializeError::Csv(err.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CsvOptions;

    fn options() -> CsvOptions {
        CsvOptions::default()
    }

    fn get<'a>(value: &'a Value, index: usize, key: &str) -> &'a Value {
        let Value::List(rows) = value else {
            panic!("expected a list of rows");
        };
        let Value::Map(row) = &rows[index] else {
            panic!("expected row {index} to be a mapping");
        };
        &row[key]
    }

    #[test]
    fn test_parse_with_header() {
        let value = parse("name,age\nAda,36\nAlan,41\n", &options()).unwrap();
        assert_eq!(get(&value, 0, "name"), &Value::from("Ada"));
        assert_eq!(get(&value, 0, "age"), &Value::from("36"));
        assert_eq!(get(&value, 1, "name"), &Value::from("Alan"));
    }

    #[test]
    fn test_parse_trims_headers_and_fields() {
        let value = parse(" name , age \n Ada , 36 \n", &options()).unwrap();
        assert_eq!(get(&value, 0, "name"), &Value::from("Ada"));
        assert_eq!(get(&value, 0, "age"), &Value::from("36"));
    }

    #[test]
    fn test_parse_without_header() {
        let value = parse(
            "a,b\nc,d\n",
            &CsvOptions {
                has_header: false,
                ..options()
            },
        )
        .unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::List(vec![Value::from("a"), Value::from("b")]),
                Value::List(vec![Value::from("c"), Value::from("d")]),
            ])
        );
    }

    #[test]
    fn test_parse_custom_delimiter() {
        let value = parse(
            "name;age\nAda;36\n",
            &CsvOptions {
                delimiter: ';',
                ..options()
            },
        )
        .unwrap();
        assert_eq!(get(&value, 0, "age"), &Value::from("36"));
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let value = parse("a,b\n1,2\n,\n3,4\n", &options()).unwrap();
        let Value::List(rows) = &value else {
            unreachable!();
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_keeps_blank_rows_when_asked() {
        let value = parse(
            "a,b\n1,2\n,\n3,4\n",
            &CsvOptions {
                skip_empty_lines: false,
                ..options()
            },
        )
        .unwrap();
        let Value::List(rows) = &value else {
            unreachable!();
        };
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let value = parse("name,notes\nAda,\"likes, commas\"\n", &options()).unwrap();
        assert_eq!(get(&value, 0, "notes"), &Value::from("likes, commas"));
    }

    #[test]
    fn test_parse_unterminated_quote_is_an_error() {
        let err = parse("name\n\"unterminated\n", &options()).unwrap_err();
        assert!(matches!(err, ParseError::Csv(_)));
    }

    #[test]
    fn test_parse_text_after_closing_quote_is_an_error() {
        let err = parse("name\n\"quoted\"x\n", &options()).unwrap_err();
        let ParseError::Csv(message) = err else {
            panic!("expected a CSV parse error");
        };
        assert!(message.contains("closing quote"));
    }

    #[test]
    fn test_parse_quoted_field_with_newline() {
        let value = parse("name,notes\nAda,\"two\nlines\"\n", &options()).unwrap();
        assert_eq!(get(&value, 0, "notes"), &Value::from("two\nlines"));
    }

    #[test]
    fn test_parse_inconsistent_field_count_is_an_error() {
        let err = parse("a,b\n1,2,3\n", &options()).unwrap_err();
        let ParseError::Csv(message) = err else {
            panic!("expected a CSV parse error");
        };
        assert!(message.contains("2"), "message should mention the line");
    }

    #[test]
    fn test_parse_non_ascii_delimiter_is_an_error() {
        let err = parse(
            "a\n",
            &CsvOptions {
                delimiter: '§',
                ..options()
            },
        )
        .unwrap_err();
        assert_eq!(err, ParseError::Delimiter('§'));
    }

    #[test]
    fn test_serialize_rejects_non_list() {
        let err = serialize(&Value::from("scalar"), &options()).unwrap_err();
        assert_eq!(err, SerializeError::NotRows("string"));
    }

    #[test]
    fn test_serialize_quotes_fields_containing_delimiter() {
        let value = parse("name,notes\nAda,\"likes, commas\"\n", &options()).unwrap();
        let text = serialize(&value, &options()).unwrap();
        assert!(text.contains("\"likes, commas\""));
    }

    #[test]
    fn test_serialize_column_union_in_first_seen_order() {
        // Going through JSON keeps the fixture terse.
        let value =
            crate::codec::json::parse(r#"[{"a":"1","b":"2"},{"b":"3","c":"4"}]"#).unwrap();
        let text = serialize(&value, &options()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("a,b,c"));
        assert_eq!(lines.next(), Some("1,2,"));
        assert_eq!(lines.next(), Some(",3,4"));
    }

    #[test]
    fn test_round_trip_preserves_rows_and_columns() {
        let original = "name,age\nAda,36\nAlan,41";
        let value = parse(original, &options()).unwrap();
        let text = serialize(&value, &options()).unwrap();
        assert_eq!(parse(&text, &options()).unwrap(), value);
    }

    #[test]
    fn test_serialize_mixed_rows_is_an_error() {
        let value = Value::List(vec![
            Value::Map(IndexMap::from_iter([(
                "a".to_string(),
                Value::from("1"),
            )])),
            Value::List(vec![Value::from("2")]),
        ]);
        let err = serialize(&value, &options()).unwrap_err();
        assert_eq!(
            err,
            SerializeError::RowKind {
                index: 1,
                kind: "list"
            }
        );
    }

    #[test]
    fn test_serialize_nested_cell_is_an_error() {
        let value = Value::List(vec![Value::Map(IndexMap::from_iter([(
            "a".to_string(),
            Value::List(vec![]),
        )]))]);
        let err = serialize(&value, &options()).unwrap_err();
        assert_eq!(
            err,
            SerializeError::NestedCell {
                column: "a".to_string(),
                kind: "list"
            }
        );
    }
}
