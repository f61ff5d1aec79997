//! Transcoding between text representations: UTF-8 text, Base64, URL
//! percent-encoding, HTML entities, `\uXXXX` escapes, hex and binary octet
//! dumps.
//!
//! A conversion decodes the input from the source representation to plain
//! text first, then encodes to the target representation, so any pair of
//! representations composes.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
    Base64,
    Url,
    Html,
    Unicode,
    Hex,
    Binary,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Base64 => "base64",
            Encoding::Url => "url",
            Encoding::Html => "html",
            Encoding::Unicode => "unicode",
            Encoding::Hex => "hex",
            Encoding::Binary => "binary",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "text" => Ok(Encoding::Utf8),
            "base64" => Ok(Encoding::Base64),
            "url" => Ok(Encoding::Url),
            "html" => Ok(Encoding::Html),
            "unicode" => Ok(Encoding::Unicode),
            "hex" => Ok(Encoding::Hex),
            "binary" => Ok(Encoding::Binary),
            other => Err(format!(
                "unknown encoding: {other}. Valid encodings: utf8, base64, url, html, unicode, hex, binary"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid base64 input: {0}")]
    Base64(String),

    #[error("invalid URL-encoded input: {0}")]
    Url(String),

    #[error("invalid character entity {0:?}")]
    Entity(String),

    #[error("invalid unicode escape: {0}")]
    Unicode(String),

    #[error("invalid hex input: {0}")]
    Hex(String),

    #[error("invalid binary input: {0}")]
    Binary(String),

    #[error("decoded bytes are not valid UTF-8")]
    Utf8,
}

/// Decode from `from`, then encode to `to`.
pub fn transcode(text: &str, from: Encoding, to: Encoding) -> Result<String, EncodingError> {
    let decoded = decode(text, from)?;
    Ok(encode(&decoded, to))
}

pub fn encode(text: &str, encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => text.to_string(),
        Encoding::Base64 => base64::engine::general_purpose::STANDARD.encode(text.as_bytes()),
        Encoding::Url => urlencoding::encode(text).into_owned(),
        Encoding::Html => encode_html(text),
        Encoding::Unicode => encode_unicode(text),
        Encoding::Hex => text
            .bytes()
            .map(|byte| format!("{byte:02x}"))
            .collect::<Vec<_>>()
            .join(" "),
        Encoding::Binary => text
            .bytes()
            .map(|byte| format!("{byte:08b}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

pub fn decode(text: &str, encoding: Encoding) -> Result<String, EncodingError> {
    match encoding {
        Encoding::Utf8 => Ok(text.to_string()),
        Encoding::Base64 => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(compact)
                .map_err(|err| EncodingError::Base64(err.to_string()))?;
            String::from_utf8(bytes).map_err(|_| EncodingError::Utf8)
        }
        Encoding::Url => urlencoding::decode(text)
            .map(|decoded| decoded.into_owned())
            .map_err(|err| EncodingError::Url(err.to_string())),
        Encoding::Html => decode_html(text),
        Encoding::Unicode => decode_unicode(text),
        Encoding::Hex => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.len() % 2 != 0 {
                return Err(EncodingError::Hex("odd number of digits".to_string()));
            }
            let bytes = (0..compact.len())
                .step_by(2)
                .map(|i| {
                    u8::from_str_radix(&compact[i..i + 2], 16)
                        .map_err(|_| EncodingError::Hex(format!("bad digits {:?}", &compact[i..i + 2])))
                })
                .collect::<Result<Vec<u8>, _>>()?;
            String::from_utf8(bytes).map_err(|_| EncodingError::Utf8)
        }
        Encoding::Binary => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.len() % 8 != 0 {
                return Err(EncodingError::Binary(
                    "length is not a multiple of 8 bits".to_string(),
                ));
            }
            let bytes = (0..compact.len())
                .step_by(8)
                .map(|i| {
                    u8::from_str_radix(&compact[i..i + 8], 2).map_err(|_| {
                        EncodingError::Binary(format!("bad bit group {:?}", &compact[i..i + 8]))
                    })
                })
                .collect::<Result<Vec<u8>, _>>()?;
            String::from_utf8(bytes).map_err(|_| EncodingError::Utf8)
        }
    }
}

fn encode_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

fn decode_entity(entity: &str) -> Result<String, EncodingError> {
    match entity {
        "&amp;" => return Ok("&".to_string()),
        "&lt;" => return Ok("<".to_string()),
        "&gt;" => return Ok(">".to_string()),
        "&quot;" => return Ok("\"".to_string()),
        "&apos;" => return Ok("'".to_string()),
        "&nbsp;" => return Ok(" ".to_string()),
        _ => {}
    }

    let body = &entity[1..entity.len() - 1];
    let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        Some(u32::from_str_radix(hex, 16))
    } else {
        body.strip_prefix('#').map(str::parse::<u32>)
    };

    match code {
        Some(parsed) => {
            let code = parsed.map_err(|_| EncodingError::Entity(entity.to_string()))?;
            char::from_u32(code)
                .map(|c| c.to_string())
                .ok_or_else(|| EncodingError::Entity(entity.to_string()))
        }
        // Unrecognized named entities pass through untouched.
        None => Ok(entity.to_string()),
    }
}

fn decode_html(text: &str) -> Result<String, EncodingError> {
    let mut out = String::with_capacity(text.len());
    let mut remainder = text;

    while let Some(start) = remainder.find('&') {
        out.push_str(&remainder[..start]);
        let tail = &remainder[start..];
        let body_end = tail[1..].find(';').map(|i| i + 1);
        match body_end {
            Some(semi)
                if semi > 1
                    && tail[1..semi]
                        .chars()
                        .all(|c| c == '#' || c.is_ascii_alphanumeric()) =>
            {
                out.push_str(&decode_entity(&tail[..=semi])?);
                remainder = &tail[semi + 1..];
            }
            _ => {
                out.push('&');
                remainder = &tail[1..];
            }
        }
    }
    out.push_str(remainder);
    Ok(out)
}

/// Escape every UTF-16 unit above ASCII as `\uXXXX`, the form JavaScript
/// string literals use. Characters outside the basic plane become surrogate
/// pairs.
fn encode_unicode(text: &str) -> String {
    let mut out = String::new();
    for unit in text.encode_utf16() {
        if unit > 127 {
            out.push_str(&format!("\\u{unit:04x}"));
        } else {
            out.push(unit as u8 as char);
        }
    }
    out
}

fn decode_unicode(text: &str) -> Result<String, EncodingError> {
    let mut units: Vec<u16> = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'u') {
            chars.next();
            let mut hex = String::new();
            for _ in 0..4 {
                match chars.next() {
                    Some(digit) => hex.push(digit),
                    None => {
                        return Err(EncodingError::Unicode(format!(
                            "truncated escape \\u{hex}"
                        )))
                    }
                }
            }
            let unit = u16::from_str_radix(&hex, 16)
                .map_err(|_| EncodingError::Unicode(format!("bad escape \\u{hex}")))?;
            units.push(unit);
        } else {
            let mut buffer = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buffer));
        }
    }

    String::from_utf16(&units)
        .map_err(|_| EncodingError::Unicode("unpaired surrogate".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        assert_eq!(encode("hello", Encoding::Base64), "aGVsbG8=");
        assert_eq!(decode("aGVsbG8=", Encoding::Base64).unwrap(), "hello");
        // Whitespace inside the input is tolerated.
        assert_eq!(decode("aGVs\nbG8=", Encoding::Base64).unwrap(), "hello");
    }

    #[test]
    fn test_base64_invalid_input() {
        assert!(matches!(
            decode("not base64!!", Encoding::Base64),
            Err(EncodingError::Base64(_))
        ));
    }

    #[test]
    fn test_url_round_trip() {
        assert_eq!(encode("a b&c", Encoding::Url), "a%20b%26c");
        assert_eq!(decode("a%20b%26c", Encoding::Url).unwrap(), "a b&c");
    }

    #[test]
    fn test_html_encode() {
        assert_eq!(
            encode("<a href=\"x\">&'/", Encoding::Html),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&#x2F;"
        );
    }

    #[test]
    fn test_html_decode_named_and_numeric() {
        assert_eq!(
            decode("&lt;b&gt; &amp; &#39;&#x2F;&nbsp;", Encoding::Html).unwrap(),
            "<b> & '/ "
        );
    }

    #[test]
    fn test_html_decode_leaves_unknown_entities() {
        assert_eq!(
            decode("&unknown; & x", Encoding::Html).unwrap(),
            "&unknown; & x"
        );
    }

    #[test]
    fn test_html_decode_bad_numeric_entity_is_an_error() {
        assert!(matches!(
            decode("&#xD800;", Encoding::Html),
            Err(EncodingError::Entity(_))
        ));
    }

    #[test]
    fn test_unicode_round_trip() {
        assert_eq!(encode("café", Encoding::Unicode), "caf\\u00e9");
        assert_eq!(decode("caf\\u00e9", Encoding::Unicode).unwrap(), "café");
    }

    #[test]
    fn test_unicode_surrogate_pair_round_trip() {
        let encoded = encode("🎉", Encoding::Unicode);
        assert_eq!(encoded, "\\ud83c\\udf89");
        assert_eq!(decode(&encoded, Encoding::Unicode).unwrap(), "🎉");
    }

    #[test]
    fn test_unicode_unpaired_surrogate_is_an_error() {
        assert!(matches!(
            decode("\\ud83c", Encoding::Unicode),
            Err(EncodingError::Unicode(_))
        ));
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(encode("hi", Encoding::Hex), "68 69");
        assert_eq!(decode("68 69", Encoding::Hex).unwrap(), "hi");
        assert_eq!(decode("6869", Encoding::Hex).unwrap(), "hi");
    }

    #[test]
    fn test_hex_odd_length_is_an_error() {
        assert!(matches!(
            decode("686", Encoding::Hex),
            Err(EncodingError::Hex(_))
        ));
    }

    #[test]
    fn test_binary_round_trip() {
        assert_eq!(encode("A", Encoding::Binary), "01000001");
        assert_eq!(decode("01000001 01000010", Encoding::Binary).unwrap(), "AB");
    }

    #[test]
    fn test_binary_bad_length_is_an_error() {
        assert!(matches!(
            decode("0100", Encoding::Binary),
            Err(EncodingError::Binary(_))
        ));
    }

    #[test]
    fn test_transcode_between_representations() {
        assert_eq!(
            transcode("aGVsbG8=", Encoding::Base64, Encoding::Hex).unwrap(),
            "68 65 6c 6c 6f"
        );
        assert_eq!(
            transcode("68 69", Encoding::Hex, Encoding::Base64).unwrap(),
            "aGk="
        );
    }

    #[test]
    fn test_transcode_utf8_is_identity() {
        assert_eq!(
            transcode("plain", Encoding::Utf8, Encoding::Utf8).unwrap(),
            "plain"
        );
    }
}
