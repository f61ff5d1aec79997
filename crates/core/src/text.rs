//! Case conversion, text statistics and find & replace.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;

use crate::pattern::{self, PatternError, PatternFlags};

/// A target case style for [`convert_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 8] = [
        CaseStyle::Upper,
        CaseStyle::Lower,
        CaseStyle::Title,
        CaseStyle::Sentence,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CaseStyle::Upper => "upper",
            CaseStyle::Lower => "lower",
            CaseStyle::Title => "title",
            CaseStyle::Sentence => "sentence",
            CaseStyle::Camel => "camel",
            CaseStyle::Pascal => "pascal",
            CaseStyle::Snake => "snake",
            CaseStyle::Kebab => "kebab",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" | "uppercase" => Ok(CaseStyle::Upper),
            "lower" | "lowercase" => Ok(CaseStyle::Lower),
            "title" => Ok(CaseStyle::Title),
            "sentence" => Ok(CaseStyle::Sentence),
            "camel" => Ok(CaseStyle::Camel),
            "pascal" => Ok(CaseStyle::Pascal),
            "snake" => Ok(CaseStyle::Snake),
            "kebab" => Ok(CaseStyle::Kebab),
            other => Err(format!(
                "unknown case style: {other}. Valid styles: upper, lower, title, sentence, camel, pascal, snake, kebab"
            )),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Split text into word tokens: runs of non-alphanumerics separate tokens,
/// and a lower-to-upper boundary inside a run starts a new token, so both
/// `hello world` and `helloWorld` tokenize to `["hello", "world"]`.
fn words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for c in text.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Title => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if c.is_whitespace() {
                    at_word_start = true;
                    out.push(c);
                } else if at_word_start {
                    out.extend(c.to_uppercase());
                    at_word_start = false;
                } else {
                    out.extend(c.to_lowercase());
                }
            }
            out
        }
        CaseStyle::Sentence => capitalize(text),
        CaseStyle::Camel => {
            let mut out = String::new();
            for (index, word) in words(text).iter().enumerate() {
                if index == 0 {
                    out.push_str(&word.to_lowercase());
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        CaseStyle::Pascal => words(text).iter().map(|word| capitalize(word)).collect(),
        CaseStyle::Snake => words(text)
            .iter()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseStyle::Kebab => words(text)
            .iter()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join("-"),
    }
}

/// Counts reported by the word counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

pub fn count_text(text: &str) -> TextStats {
    let paragraph_break = Regex::new(r"\n\s*\n").expect("static pattern");
    TextStats {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        lines: text.split('\n').count(),
        paragraphs: paragraph_break
            .split(text)
            .filter(|block| !block.trim().is_empty())
            .count(),
    }
}

/// Options for [`find_replace`].
#[derive(Debug, Clone, Copy)]
pub struct ReplaceOptions {
    /// Interpret the search string as a pattern instead of literal text.
    pub regex: bool,
    pub case_sensitive: bool,
    /// Replace every occurrence instead of only the first.
    pub global: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: false,
            global: true,
        }
    }
}

/// Find and replace. Literal mode escapes the search string (and any `$` in
/// the replacement) before delegating to the pattern engine, so both modes
/// share the same scan semantics. An empty search string returns the input
/// unchanged.
pub fn find_replace(
    text: &str,
    find: &str,
    replace: &str,
    options: ReplaceOptions,
) -> Result<String, PatternError> {
    if find.is_empty() {
        return Ok(text.to_string());
    }

    let flags = PatternFlags {
        global: options.global,
        ignore_case: !options.case_sensitive,
        ..PatternFlags::default()
    };

    if options.regex {
        let matcher = pattern::compile(find, flags)?;
        pattern::replace(&matcher, text, replace)
    } else {
        let matcher = pattern::compile(&regex::escape(find), flags)?;
        pattern::replace(&matcher, text, &replace.replace('$', "$$"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_case_upper_and_lower() {
        assert_eq!(convert_case("Hello World", CaseStyle::Upper), "HELLO WORLD");
        assert_eq!(convert_case("Hello World", CaseStyle::Lower), "hello world");
    }

    #[test]
    fn test_convert_case_title() {
        assert_eq!(
            convert_case("hello WORLD again", CaseStyle::Title),
            "Hello World Again"
        );
    }

    #[test]
    fn test_convert_case_sentence() {
        assert_eq!(
            convert_case("hello WORLD", CaseStyle::Sentence),
            "Hello world"
        );
    }

    #[test]
    fn test_convert_case_camel() {
        assert_eq!(convert_case("hello world", CaseStyle::Camel), "helloWorld");
        assert_eq!(convert_case("Hello-World_x", CaseStyle::Camel), "helloWorldX");
    }

    #[test]
    fn test_convert_case_pascal() {
        assert_eq!(convert_case("hello world", CaseStyle::Pascal), "HelloWorld");
    }

    #[test]
    fn test_convert_case_snake() {
        assert_eq!(convert_case("Hello World", CaseStyle::Snake), "hello_world");
        assert_eq!(convert_case("helloWorld", CaseStyle::Snake), "hello_world");
    }

    #[test]
    fn test_convert_case_kebab() {
        assert_eq!(convert_case("Hello World", CaseStyle::Kebab), "hello-world");
        assert_eq!(convert_case("helloWorld", CaseStyle::Kebab), "hello-world");
    }

    #[test]
    fn test_convert_case_empty_input() {
        for style in CaseStyle::ALL {
            assert_eq!(convert_case("", style), "");
        }
    }

    #[test]
    fn test_count_text_basic() {
        let stats = count_text("one two\nthree");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 13);
        assert_eq!(stats.characters_no_spaces, 11);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn test_count_text_empty() {
        let stats = count_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.paragraphs, 0);
    }

    #[test]
    fn test_count_text_paragraphs() {
        let stats = count_text("first block\n\nsecond block\n   \nthird");
        assert_eq!(stats.paragraphs, 3);
    }

    #[test]
    fn test_find_replace_literal_global() {
        let options = ReplaceOptions {
            case_sensitive: true,
            ..ReplaceOptions::default()
        };
        let replaced = find_replace("aaa", "a", "b", options).unwrap();
        assert_eq!(replaced, "bbb");
    }

    #[test]
    fn test_find_replace_literal_case_insensitive() {
        let replaced = find_replace("Foo foo FOO", "foo", "bar", ReplaceOptions::default()).unwrap();
        assert_eq!(replaced, "bar bar bar");
    }

    #[test]
    fn test_find_replace_literal_first_only() {
        let options = ReplaceOptions {
            global: false,
            case_sensitive: true,
            ..ReplaceOptions::default()
        };
        let replaced = find_replace("aaa", "a", "b", options).unwrap();
        assert_eq!(replaced, "baa");
    }

    #[test]
    fn test_find_replace_literal_treats_metacharacters_literally() {
        let options = ReplaceOptions {
            case_sensitive: true,
            ..ReplaceOptions::default()
        };
        let replaced = find_replace("1+1=2", "1+1", "two", options).unwrap();
        assert_eq!(replaced, "two=2");
    }

    #[test]
    fn test_find_replace_literal_replacement_dollar_is_literal() {
        let options = ReplaceOptions {
            case_sensitive: true,
            ..ReplaceOptions::default()
        };
        let replaced = find_replace("cost", "cost", "$1", options).unwrap();
        assert_eq!(replaced, "$1");
    }

    #[test]
    fn test_find_replace_regex_mode() {
        let options = ReplaceOptions {
            regex: true,
            case_sensitive: true,
            ..ReplaceOptions::default()
        };
        let replaced = find_replace("a1b22c", r"\d+", "#", options).unwrap();
        assert_eq!(replaced, "a#b#c");
    }

    #[test]
    fn test_find_replace_empty_needle_returns_input() {
        let replaced = find_replace("abc", "", "x", ReplaceOptions::default()).unwrap();
        assert_eq!(replaced, "abc");
    }

    #[test]
    fn test_find_replace_invalid_regex_is_an_error() {
        let options = ReplaceOptions {
            regex: true,
            ..ReplaceOptions::default()
        };
        assert!(find_replace("abc", "(", "x", options).is_err());
    }
}
