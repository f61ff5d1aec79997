use std::path::PathBuf;

use crate::prelude::{println, *};
use toolbelt_core::hash::{digest_hex, HashAlgorithm};

#[derive(Debug, clap::Args, Clone)]
pub struct HashOptions {
    /// Text to digest; read from --file or stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Algorithm: md5, sha1, or sha256; all three when omitted
    #[arg(short, long)]
    pub algorithm: Option<HashAlgorithm>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct HashOutput {
    pub algorithm: HashAlgorithm,
    pub digest: String,
}

pub async fn run(options: HashOptions, global: crate::Global) -> Result<()> {
    let text = crate::input::resolve(options.text.clone(), options.file.clone()).await?;
    let output = hash_data(&text, options.algorithm);

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else if let [only] = output.as_slice() {
        println!("{}", only.digest);
    } else {
        print!("{}", format_hashes_text(&output));
    }

    Ok(())
}

/// Digest with the selected algorithm, or all of them when none is picked.
pub fn hash_data(text: &str, algorithm: Option<HashAlgorithm>) -> Vec<HashOutput> {
    let algorithms: Vec<HashAlgorithm> = match algorithm {
        Some(algorithm) => vec![algorithm],
        None => HashAlgorithm::ALL.to_vec(),
    };
    algorithms
        .into_iter()
        .map(|algorithm| HashOutput {
            algorithm,
            digest: digest_hex(text, algorithm),
        })
        .collect()
}

pub fn format_hashes_text(output: &[HashOutput]) -> String {
    let mut table = new_table();
    for hash in output {
        table.add_row(prettytable::row![hash.algorithm, hash.digest]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_data_single_algorithm() {
        let output = hash_data("abc", Some(HashAlgorithm::Md5));
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].digest, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_hash_data_all_algorithms() {
        let output = hash_data("abc", None);
        assert_eq!(output.len(), 3);
        assert_eq!(output[0].algorithm, HashAlgorithm::Md5);
        assert_eq!(output[2].algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_format_hashes_text() {
        let formatted = format_hashes_text(&hash_data("abc", None));
        assert!(formatted.contains("md5"));
        assert!(formatted.contains("sha256"));
        assert!(formatted.contains("900150983cd24fb0d6963f7d28e17f72"));
    }
}
