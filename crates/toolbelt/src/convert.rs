use std::path::PathBuf;

use crate::prelude::{println, *};
use colored::Colorize;
use toolbelt_core::codec::{self, CsvOptions, Format, JsonOptions, XmlOptions};
use toolbelt_core::value::Value;

#[derive(Debug, clap::Args, Clone)]
pub struct ConvertOptions {
    /// Input text; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub input: Option<String>,

    /// Input format: csv, json, or xml
    #[arg(short, long, env = "TOOLBELT_CONVERT_FROM")]
    pub from: Format,

    /// Output format: csv, json, or xml
    #[arg(short, long, env = "TOOLBELT_CONVERT_TO")]
    pub to: Format,

    /// Read the input from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Write the converted output to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Treat the first CSV row as data, not column names
    #[arg(long)]
    pub no_header: bool,

    /// Keep CSV rows whose fields are all empty
    #[arg(long)]
    pub keep_empty_lines: bool,

    /// Indent width for JSON and XML output (0 for compact JSON)
    #[arg(long, default_value = "2")]
    pub indent: usize,

    /// Sort JSON object keys lexicographically
    #[arg(long)]
    pub sort_keys: bool,

    /// XML root element name
    #[arg(long, default_value = "root")]
    pub root: String,

    /// XML element name wrapping list items
    #[arg(long, default_value = "item")]
    pub item: String,

    /// Output a JSON envelope with conversion metadata
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ConvertOutput {
    pub from: Format,
    pub to: Format,
    pub records: usize,
    pub output: String,
}

pub async fn run(options: ConvertOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Converting {} to {}...", options.from, options.to);
    }

    let text = crate::input::resolve(options.input.clone(), options.file.clone()).await?;
    if text.trim().is_empty() {
        println!("{}", "Nothing to convert.".yellow());
        return Ok(());
    }

    let output = convert_data(&text, &options)?;

    if options.json {
        output_json(&output)?;
        return Ok(());
    }

    match &options.output {
        Some(path) => {
            tokio::fs::write(path, &output.output)
                .await
                .wrap_err_with(|| f!("Failed to write {}", path.display()))?;
            println!(
                "Wrote {} record{} to {}",
                output.records,
                if output.records == 1 { "" } else { "s" },
                path.display()
            );
        }
        None => println!("{}", output.output),
    }

    Ok(())
}

/// Parse the input in its source format and serialize it into the target
/// format, reporting how many records passed through.
pub fn convert_data(text: &str, options: &ConvertOptions) -> Result<ConvertOutput> {
    let codec_options = codec::ConvertOptions {
        csv: CsvOptions {
            delimiter: options.delimiter,
            has_header: !options.no_header,
            skip_empty_lines: !options.keep_empty_lines,
        },
        json: JsonOptions {
            indent: options.indent,
            sort_keys: options.sort_keys,
        },
        xml: XmlOptions {
            root_element: options.root.clone(),
            item_element: options.item.clone(),
            indent: options.indent,
        },
    };

    let value = codec::parse(text, options.from, &codec_options)?;
    let records = match &value {
        Value::List(rows) => rows.len(),
        _ => 1,
    };
    let output = codec::serialize(&value, options.to, &codec_options)?;

    Ok(ConvertOutput {
        from: options.from,
        to: options.to,
        records,
        output,
    })
}

fn output_json(output: &ConvertOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
    println!("{}", json);
    Ok(())
}
