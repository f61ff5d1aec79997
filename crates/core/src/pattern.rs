//! Pattern compilation, match enumeration, highlighting and replacement.
//!
//! A [`Matcher`] is a compiled pattern plus its flag set. Matching walks the
//! input with an explicit scan cursor owned by the caller's invocation, so no
//! state survives between calls. Offsets are byte offsets into the UTF-8
//! input; the cursor only ever lands on character boundaries.

use indexmap::IndexMap;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;

/// Upper bound on recorded matches, so a pathological scan surfaces as an
/// error instead of hanging the calling thread.
const MATCH_LIMIT: usize = 1_000_000;

/// Independently toggleable matching flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternFlags {
    /// Find all matches instead of only the first.
    pub global: bool,
    /// Case-insensitive matching.
    pub ignore_case: bool,
    /// `^`/`$` match line boundaries, not just string boundaries.
    pub multiline: bool,
    /// `.` also matches newlines.
    pub dot_all: bool,
    /// Unicode-aware character classes; disabling restricts `\w`, `\d`,
    /// `\s` and friends to ASCII.
    pub unicode: bool,
    /// Matches must start exactly at the scan cursor, no seeking ahead.
    pub sticky: bool,
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self {
            global: true,
            ignore_case: false,
            multiline: false,
            dot_all: false,
            unicode: true,
            sticky: false,
        }
    }
}

impl PatternFlags {
    /// Compact single-letter rendition, e.g. `gi`.
    pub fn letters(&self) -> String {
        let mut letters = String::new();
        for (enabled, letter) in [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ] {
            if enabled {
                letters.push(letter);
            }
        }
        letters
    }
}

/// A compiled pattern ready to be evaluated against text.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    flags: PatternFlags,
}

impl Matcher {
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern is not valid for the engine's grammar. Carries the
    /// engine's diagnostic verbatim; always recoverable.
    #[error("invalid pattern: {0}")]
    Compile(String),

    /// The scan was aborted after recording too many matches.
    #[error("match scan aborted after {0} matches")]
    MatchLimit(usize),
}

/// A single match: the matched substring, its byte offset, the unnamed
/// capture groups in order (`None` when a group did not participate), and
/// any named captures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub text: String,
    pub offset: usize,
    pub groups: Vec<Option<String>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub named: IndexMap<String, String>,
}

impl PatternMatch {
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// One span of the highlight partition. Concatenating every span in order
/// reproduces the source text exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightSpan {
    pub text: String,
    pub is_match: bool,
}

pub fn compile(pattern: &str, flags: PatternFlags) -> Result<Matcher, PatternError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(flags.ignore_case)
        .multi_line(flags.multiline)
        .dot_matches_new_line(flags.dot_all)
        .unicode(flags.unicode)
        .build()
        .map_err(|err| PatternError::Compile(err.to_string()))?;
    Ok(Matcher { regex, flags })
}

fn record(matcher: &Matcher, caps: &Captures<'_>, whole: &regex::Match<'_>) -> PatternMatch {
    let mut groups = Vec::new();
    let mut named = IndexMap::new();
    for (index, name) in matcher.regex.capture_names().enumerate().skip(1) {
        let captured = caps.get(index).map(|group| group.as_str().to_string());
        if let (Some(name), Some(value)) = (name, captured.as_ref()) {
            named.insert(name.to_string(), value.clone());
        }
        groups.push(captured);
    }
    PatternMatch {
        text: whole.as_str().to_string(),
        offset: whole.start(),
        groups,
        named,
    }
}

fn advance_past_char(text: &str, position: usize) -> usize {
    text[position..]
        .chars()
        .next()
        .map_or(text.len(), |c| position + c.len_utf8())
}

/// Enumerate non-overlapping matches in ascending offset order.
///
/// The cursor advances to each match's end, except after a zero-length
/// match, where it advances past one character so the scan always
/// terminates. Non-global mode stops after the first match; sticky mode
/// stops as soon as no match starts exactly at the cursor.
pub fn find_all(matcher: &Matcher, text: &str) -> Result<Vec<PatternMatch>, PatternError> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while cursor <= text.len() {
        let Some(caps) = matcher.regex.captures_at(text, cursor) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if matcher.flags.sticky && whole.start() != cursor {
            break;
        }

        matches.push(record(matcher, &caps, &whole));
        if matches.len() >= MATCH_LIMIT {
            return Err(PatternError::MatchLimit(MATCH_LIMIT));
        }
        if !matcher.flags.global {
            break;
        }

        if whole.range().is_empty() {
            if whole.end() >= text.len() {
                break;
            }
            cursor = advance_past_char(text, whole.end());
        } else {
            cursor = whole.end();
        }
    }

    Ok(matches)
}

/// Partition `text` into matched and unmatched spans for display. Empty
/// spans are omitted; the spans concatenate back to exactly `text`.
pub fn highlight(text: &str, matches: &[PatternMatch]) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for found in matches {
        if found.offset > cursor {
            spans.push(HighlightSpan {
                text: text[cursor..found.offset].to_string(),
                is_match: false,
            });
        }
        if !found.text.is_empty() {
            spans.push(HighlightSpan {
                text: found.text.clone(),
                is_match: true,
            });
        }
        cursor = found.end();
    }
    if cursor < text.len() {
        spans.push(HighlightSpan {
            text: text[cursor..].to_string(),
            is_match: false,
        });
    }

    spans
}

/// Expand a replacement template against one match. `$1`, `$2`, … expand to
/// the corresponding capture group, `$&` to the whole match, `${name}` to a
/// named capture, and `$$` to a literal `$`. A group that is out of range or
/// did not participate expands to the empty string.
fn expand_template(template: &str, found: &PatternMatch) -> String {
    let mut out = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('&') => {
                chars.next();
                out.push_str(&found.text);
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    out.push_str("${");
                    out.push_str(&name);
                } else if let Ok(number) = name.parse::<usize>() {
                    push_group(&mut out, found, number);
                } else if let Some(value) = found.named.get(&name) {
                    out.push_str(value);
                }
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                if let Ok(number) = digits.parse::<usize>() {
                    push_group(&mut out, found, number);
                }
            }
            _ => out.push('$'),
        }
    }

    out
}

fn push_group(out: &mut String, found: &PatternMatch, number: usize) {
    if number == 0 {
        return;
    }
    if let Some(Some(value)) = found.groups.get(number - 1) {
        out.push_str(value);
    }
}

/// Replace matches with the expanded `template`. Every match is replaced in
/// global mode, only the first otherwise.
pub fn replace(matcher: &Matcher, text: &str, template: &str) -> Result<String, PatternError> {
    let matches = find_all(matcher, text)?;
    let mut out = String::new();
    let mut cursor = 0;

    for found in &matches {
        out.push_str(&text[cursor..found.offset]);
        out.push_str(&expand_template(template, found));
        cursor = found.end();
    }
    out.push_str(&text[cursor..]);

    Ok(out)
}
