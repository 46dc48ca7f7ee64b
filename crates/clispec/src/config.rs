//! Export configuration
//!
//! Read from `.clispec.yaml` in the working directory when present. Every
//! field is optional; missing ones keep their defaults.
//!
//! ```yaml
//! output_dir: docs
//! spec_filename: spec.json
//! license: MIT
//! link_prefix: /libraries-and-tools/
//! front_matter:
//!   categories: Libraries & Tools
//!   type: Commands
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = ".clispec.yaml";

/// Settings shared by both exporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory both exporters write into
    pub output_dir: PathBuf,

    /// File name of the JSON spec inside `output_dir`
    pub spec_filename: String,

    /// `info.title`; defaults to "Specification for <program>"
    pub title: Option<String>,

    pub license: String,

    /// Site path prepended to every resolved markdown link
    pub link_prefix: String,

    pub front_matter: FrontMatter,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            spec_filename: "spec.json".to_string(),
            title: None,
            license: "MIT".to_string(),
            link_prefix: "/libraries-and-tools/".to_string(),
            front_matter: FrontMatter::default(),
        }
    }
}

/// Fixed metadata in every markdown page's front matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub categories: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub tags: String,
    pub products: String,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            categories: "Libraries & Tools".to_string(),
            doc_type: "Commands".to_string(),
            tags: "qlik-cli".to_string(),
            products: "Qlik Cloud, QSEoK".to_string(),
        }
    }
}

impl ExportConfig {
    /// Load `.clispec.yaml` from the working directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ExportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ExportError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Full path of the JSON spec
    pub fn spec_path(&self) -> PathBuf {
        self.output_dir.join(&self.spec_filename)
    }

    /// `info.title` for a program
    pub fn title_for(&self, program: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Specification for {}", program))
    }
}
