//! Merge a set of named documents into one, with a configurable separator
//! template.

use serde::Serialize;

/// How documents are ordered before merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOrder {
    /// Keep the order the documents were given in.
    #[default]
    Given,
    /// Sort by document name.
    Name,
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Separator emitted before each document. `{filename}` expands to the
    /// document's name and `{index}` to its 1-based position.
    pub separator: String,
    /// Whether the separator is emitted at all.
    pub include_separators: bool,
    /// Prefix every line of each document with its line number.
    pub line_numbers: bool,
    pub order: MergeOrder,
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            separator: "\n\n=== {filename} ===\n\n".to_string(),
            include_separators: true,
            line_numbers: false,
            order: MergeOrder::Given,
            header: None,
            footer: None,
        }
    }
}

fn number_lines(content: &str) -> String {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| format!("{:4}: {line}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Merge `documents` (name, content) pairs into one text.
pub fn merge_documents(documents: &[(String, String)], options: &MergeOptions) -> String {
    let mut ordered: Vec<&(String, String)> = documents.iter().collect();
    if options.order == MergeOrder::Name {
        ordered.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let mut out = String::new();
    if let Some(header) = &options.header {
        out.push_str(header);
        out.push_str("\n\n");
    }

    for (index, (name, content)) in ordered.iter().enumerate() {
        if options.include_separators {
            let separator = options
                .separator
                .replace("{filename}", name)
                .replace("{index}", &(index + 1).to_string());
            out.push_str(&separator);
        }
        if options.line_numbers {
            out.push_str(&number_lines(content));
        } else {
            out.push_str(content);
        }
    }

    if let Some(footer) = &options.footer {
        out.push_str("\n\n");
        out.push_str(footer);
    }

    out
}
