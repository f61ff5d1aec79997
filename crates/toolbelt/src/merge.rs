use std::path::PathBuf;

use crate::prelude::{println, *};
use futures::future::join_all;
use toolbelt_core::merge::{merge_documents, MergeOptions as CoreMergeOptions, MergeOrder};

#[derive(Debug, clap::Args, Clone)]
pub struct MergeOptions {
    /// Files to merge, in the given order
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Separator emitted before each file; {filename} and {index} expand
    #[arg(long, default_value = "\n\n=== {filename} ===\n\n")]
    pub separator: String,

    /// Concatenate the files without separators
    #[arg(long)]
    pub plain: bool,

    /// Prefix every line with its line number
    #[arg(long)]
    pub line_numbers: bool,

    /// Sort the files by name before merging
    #[arg(long)]
    pub sort: bool,

    /// Text prepended before the first file
    #[arg(long)]
    pub header: Option<String>,

    /// Text appended after the last file
    #[arg(long)]
    pub footer: Option<String>,

    /// Write the merged output to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct MergeOutput {
    pub files: usize,
    pub result: String,
}

pub async fn run(options: MergeOptions, global: crate::Global) -> Result<()> {
    if options.files.is_empty() {
        return Err(Error::NoInput.into());
    }
    if global.verbose {
        println!("Merging {} file(s)...", options.files.len());
    }

    // Read every file concurrently; any failure aborts the merge.
    let reads = options.files.iter().map(|path| crate::input::read_file(path));
    let contents = join_all(reads)
        .await
        .into_iter()
        .collect::<Result<Vec<String>, Error>>()?;

    let documents: Vec<(String, String)> = options
        .files
        .iter()
        .zip(contents)
        .map(|(path, content)| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (name, content)
        })
        .collect();

    let core_options = CoreMergeOptions {
        separator: options.separator.clone(),
        include_separators: !options.plain,
        line_numbers: options.line_numbers,
        order: if options.sort {
            MergeOrder::Name
        } else {
            MergeOrder::Given
        },
        header: options.header.clone(),
        footer: options.footer.clone(),
    };
    let merged = merge_documents(&documents, &core_options);

    if options.json {
        let output = MergeOutput {
            files: documents.len(),
            result: merged,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
        return Ok(());
    }

    match &options.output {
        Some(path) => {
            tokio::fs::write(path, &merged)
                .await
                .wrap_err_with(|| f!("Failed to write {}", path.display()))?;
            println!("Merged {} file(s) into {}", documents.len(), path.display());
        }
        None => println!("{}", merged),
    }

    Ok(())
}
