//! Lorem ipsum and password generators.
//!
//! Both take the RNG as an argument, so callers own the entropy source and
//! tests can seed a deterministic one.

use rand::Rng;

/// The canonical lorem ipsum vocabulary.
const LOREM_WORDS: [&str; 62] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
    "duis",
    "aute",
    "irure",
    "in",
    "reprehenderit",
    "voluptate",
    "velit",
    "esse",
    "cillum",
    "fugiat",
    "nulla",
    "pariatur",
    "excepteur",
    "sint",
    "occaecat",
    "cupidatat",
    "non",
    "proident",
    "sunt",
    "culpa",
    "qui",
    "officia",
    "deserunt",
    "mollit",
    "anim",
    "id",
    "est",
    "laborum",
];

/// Generate `paragraphs` paragraphs of `words_per_paragraph` random lorem
/// words each. The first word of a paragraph is capitalized, the paragraph
/// ends with a period, and paragraphs are separated by a blank line.
pub fn lorem_ipsum<R: Rng>(paragraphs: usize, words_per_paragraph: usize, rng: &mut R) -> String {
    let mut blocks = Vec::with_capacity(paragraphs);
    for _ in 0..paragraphs {
        let mut paragraph = String::new();
        for index in 0..words_per_paragraph {
            let word = LOREM_WORDS[rng.gen_range(0..LOREM_WORDS.len())];
            if index == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    paragraph.extend(first.to_uppercase());
                    paragraph.push_str(chars.as_str());
                }
            } else {
                paragraph.push(' ');
                paragraph.push_str(word);
            }
        }
        paragraph.push('.');
        blocks.push(paragraph);
    }
    blocks.join("\n\n")
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    /// Drop characters that are easily confused for one another (`il1Lo0O`).
    pub exclude_similar: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
            exclude_similar: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    #[error("no character classes selected")]
    EmptyCharset,
}

const SIMILAR: &str = "il1Lo0O";

pub fn generate_password<R: Rng>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    let mut charset = String::new();
    if options.lowercase {
        charset.push_str("abcdefghijklmnopqrstuvwxyz");
    }
    if options.uppercase {
        charset.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
    if options.numbers {
        charset.push_str("0123456789");
    }
    if options.symbols {
        charset.push_str("!@#$%^&*()_+-=[]{}|;:,.<>?");
    }
    if options.exclude_similar {
        charset.retain(|c| !SIMILAR.contains(c));
    }

    let charset: Vec<char> = charset.chars().collect();
    if charset.is_empty() {
        return Err(GeneratorError::EmptyCharset);
    }

    Ok((0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect())
}
