use std::path::PathBuf;

use crate::prelude::{println, *};
use colored::Colorize;
use toolbelt_core::pattern::{self, HighlightSpan, PatternFlags, PatternMatch};

#[derive(Debug, clap::Args, Clone)]
pub struct FindOptions {
    /// Pattern to compile
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Text to search; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[clap(flatten)]
    pub flags: super::FlagOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct FindOutput {
    pub pattern: String,
    pub flags: String,
    pub total: usize,
    pub matches: Vec<PatternMatch>,
    #[serde(skip)]
    pub spans: Vec<HighlightSpan>,
}

pub async fn run(options: FindOptions, global: crate::Global) -> Result<()> {
    let flags = options.flags.to_flags();
    if global.verbose {
        println!("Pattern: /{}/{}", options.pattern, flags.letters());
    }

    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let output = find_data(&options.pattern, &text, flags)?;

    if options.json {
        output_json(&output)?;
    } else {
        print!("{}", format_find_text(&output));
    }

    Ok(())
}

/// Compile the pattern, enumerate matches and build the highlight partition.
pub fn find_data(pattern: &str, text: &str, flags: PatternFlags) -> Result<FindOutput> {
    let matcher = pattern::compile(pattern, flags)?;
    let matches = pattern::find_all(&matcher, text)?;
    let spans = pattern::highlight(text, &matches);

    Ok(FindOutput {
        pattern: pattern.to_string(),
        flags: flags.letters(),
        total: matches.len(),
        matches,
        spans,
    })
}

fn format_group(group: &Option<String>) -> String {
    match group {
        Some(value) => f!("{value:?}"),
        None => "-".to_string(),
    }
}

/// Human-readable match report: a summary table plus the highlighted text.
pub fn format_find_text(output: &FindOutput) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "{} MATCH{} FOR /{}/{}",
            output.total,
            if output.total == 1 { "" } else { "ES" },
            output.pattern,
            output.flags
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if output.matches.is_empty() {
        result.push_str(&f!("\n{}\n", "No matches.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["#", "Offset", "Match", "Groups", "Named"]);
    for (index, found) in output.matches.iter().enumerate() {
        let groups = found
            .groups
            .iter()
            .map(format_group)
            .collect::<Vec<_>>()
            .join(", ");
        let named = found
            .named
            .iter()
            .map(|(name, value)| f!("{name}={value:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(prettytable::row![
            index + 1,
            found.offset,
            f!("{:?}", found.text),
            groups,
            named
        ]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&f!("\n{}\n", "HIGHLIGHT".bright_yellow().bold()));
    for span in &output.spans {
        if span.is_match {
            result.push_str(&f!("{}", span.text.black().on_yellow()));
        } else {
            result.push_str(&span.text);
        }
    }
    result.push('\n');

    result
}

fn output_json(output: &FindOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> PatternFlags {
        PatternFlags::default()
    }

    #[test]
    fn test_find_data_counts_matches() {
        let output = find_data(r"\d+", "a12b345", flags()).unwrap();
        assert_eq!(output.total, 2);
        assert_eq!(output.matches[0].offset, 1);
        assert_eq!(output.flags, "gu");
    }

    #[test]
    fn test_find_data_invalid_pattern_is_an_error() {
        assert!(find_data("(", "text", flags()).is_err());
    }

    #[test]
    fn test_format_find_text_lists_matches() {
        let output = find_data(r"\d+", "a12b345", flags()).unwrap();
        let formatted = format_find_text(&output);
        assert!(formatted.contains("2 MATCHES"));
        assert!(formatted.contains("\"12\""));
        assert!(formatted.contains("\"345\""));
        assert!(formatted.contains("HIGHLIGHT"));
    }

    #[test]
    fn test_format_find_text_no_matches() {
        let output = find_data(r"z+", "abc", flags()).unwrap();
        let formatted = format_find_text(&output);
        assert!(formatted.contains("0 MATCHES"));
        assert!(formatted.contains("No matches."));
    }

    #[test]
    fn test_format_find_text_shows_groups() {
        let output = find_data(r"(\w+)@(\w+)", "user@host", flags()).unwrap();
        let formatted = format_find_text(&output);
        assert!(formatted.contains("\"user\""));
        assert!(formatted.contains("\"host\""));
    }

    #[test]
    fn test_json_output_shape() {
        let output = find_data(r"(?P<word>\w+)", "hi", flags()).unwrap();
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"total\":1"));
        assert!(json.contains("\"named\":{\"word\":\"hi\"}"));
    }
}
