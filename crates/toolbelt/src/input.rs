use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::error::Error;

/// Resolve a tool's input text: an inline argument wins, then `--file`,
/// then stdin.
pub async fn resolve(text: Option<String>, file: Option<PathBuf>) -> Result<String, Error> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return read_file(&path).await;
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .map_err(|err| Error::Stdin(err.to_string()))?;
    Ok(buffer)
}

pub async fn read_file(path: &Path) -> Result<String, Error> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::FileRead {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}
