//! Export errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while exporting a command tree
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize spec: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
