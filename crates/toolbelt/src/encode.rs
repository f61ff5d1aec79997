use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::encoding::{transcode, Encoding};

#[derive(Debug, clap::Args, Clone)]
pub struct EncodeOptions {
    /// Text to transcode; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Input encoding: utf8, base64, url, html, unicode, hex, binary
    #[arg(short, long, default_value = "utf8")]
    pub from: Encoding,

    /// Output encoding: utf8, base64, url, html, unicode, hex, binary
    #[arg(short, long)]
    pub to: Encoding,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct EncodeOutput {
    pub from: Encoding,
    pub to: Encoding,
    pub result: String,
}

pub async fn run(options: EncodeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Transcoding {} to {}...", options.from, options.to);
    }

    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let output = EncodeOutput {
        from: options.from,
        to: options.to,
        result: transcode(&text, options.from, options.to)?,
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
