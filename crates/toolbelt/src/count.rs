use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::text::{count_text, TextStats};

#[derive(Debug, clap::Args, Clone)]
pub struct CountOptions {
    /// Text to count; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: CountOptions, global: crate::Global) -> Result<()> {
    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let stats = count_text(&text);

    if options.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        print!("{}", format_stats_text(&stats));
    }

    Ok(())
}

pub fn format_stats_text(stats: &TextStats) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["Words", stats.words]);
    table.add_row(prettytable::row!["Characters", stats.characters]);
    table.add_row(prettytable::row![
        "Characters (no spaces)",
        stats.characters_no_spaces
    ]);
    table.add_row(prettytable::row!["Lines", stats.lines]);
    table.add_row(prettytable::row!["Paragraphs", stats.paragraphs]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stats_text() {
        let formatted = format_stats_text(&count_text("one two\n\nthree"));
        assert!(formatted.contains("Words"));
        assert!(formatted.contains("3"));
        assert!(formatted.contains("Paragraphs"));
        assert!(formatted.contains("2"));
    }
}
