use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::pattern::{self, PatternFlags};

#[derive(Debug, clap::Args, Clone)]
pub struct ReplaceOptions {
    /// Pattern to compile
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Replacement template; $1..$n, ${name}, $& and $$ expand per match
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Text to rewrite; read from --file or stdin when omitted
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
pub struct ReplaceOutput {
    pub pattern: String,
    pub template: String,
    pub replacements: usize,
    pub result: String,
}

pub async fn run(options: ReplaceOptions, global: crate::Global) -> Result<()> {
    let flags = options.flags.to_flags();
    if global.verbose {
        println!(
            "Replacing /{}/{} with {:?}",
            options.pattern,
            flags.letters(),
            options.template
        );
    }

    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let output = replace_data(&options.pattern, &text, &options.template, flags)?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", output.result);
    }

    Ok(())
}

pub fn replace_data(
    pattern: &str,
    text: &str,
    template: &str,
    flags: PatternFlags,
) -> Result<ReplaceOutput> {
    let matcher = pattern::compile(pattern, flags)?;
    let replacements = pattern::find_all(&matcher, text)?.len();
    let result = pattern::replace(&matcher, text, template)?;

    Ok(ReplaceOutput {
        pattern: pattern.to_string(),
        template: template.to_string(),
        replacements,
        result,
    })
}
