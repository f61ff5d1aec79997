use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::text::{convert_case, CaseStyle};

#[derive(Debug, clap::Args, Clone)]
pub struct CaseOptions {
    /// Target style: upper, lower, title, sentence, camel, pascal, snake, kebab
    #[arg(value_name = "STYLE")]
    pub style: CaseStyle,

    /// Text to convert; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct CaseOutput {
    pub style: CaseStyle,
    pub result: String,
}

pub async fn run(options: CaseOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Converting to {} case...", options.style);
    }

    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let output = CaseOutput {
        style: options.style,
        result: convert_case(&text, options.style),
    };

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", output.result);
    }

    Ok(())
}
