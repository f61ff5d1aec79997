use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::text::{self, ReplaceOptions as CoreReplaceOptions};

#[derive(Debug, clap::Args, Clone)]
pub struct ReplaceOptions {
    /// Text to search; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Text to find
    #[arg(short = 'F', long)]
    pub find: String,

    /// Replacement text
    #[arg(short = 'R', long = "with", value_name = "REPLACEMENT")]
    pub replacement: String,

    /// Interpret the search string as a regular expression
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Match case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Replace only the first occurrence
    #[arg(long)]
    pub first: bool,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ReplaceOutput {
    pub changed: bool,
    pub result: String,
}

pub async fn run(options: ReplaceOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Replacing {:?} with {:?}...",
            options.find, options.replacement
        );
    }

    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let result = text::find_replace(
        &text,
        &options.find,
        &options.replacement,
        CoreReplaceOptions {
            regex: options.regex,
            case_sensitive: options.case_sensitive,
            global: !options.first,
        },
    )?;

    if options.json {
        let output = ReplaceOutput {
            changed: result != text,
            result,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", result);
    }

    Ok(())
}
