//! JSON spec emitter

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::flags::{extract_flags, FlagSpec};
use crate::output::{ensure_dir, write_file};
use crate::source::CommandSource;
use crate::walker::{stability, walk_children, CommandNode};

/// Version of the spec document format
pub const CLISPEC_VERSION: &str = "0.1.0";

/// Root of the JSON spec document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEnvelope {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub info: Info,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub clispec: String,

    #[serde(rename = "x-qlik-stability", default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, FlagSpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Always present, even when empty
    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,
}

impl SpecEnvelope {
    /// Build the envelope for the tree rooted at `root`
    pub fn build<C: CommandSource>(root: &C, version: &str, config: &ExportConfig) -> Self {
        let name = root.name();

        Self {
            info: Info {
                title: config.title_for(&name),
                description: root.long(),
                version: normalize_version(version).to_string(),
                license: config.license.clone(),
            },
            name,
            clispec: CLISPEC_VERSION.to_string(),
            stability: stability(root),
            flags: extract_flags(&root.local_flags()),
            commands: walk_children(root),
        }
    }

    /// Indented JSON (two spaces)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every command below the root, at any depth
    pub fn command_count(&self) -> usize {
        self.commands
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Strip a single leading `v` (`v1.2.3` -> `1.2.3`)
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Serialize `spec` into `writer`; nothing is written if serialization fails
pub fn write_spec<W: Write>(spec: &SpecEnvelope, writer: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(spec)?;
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(ExportError::Output)
}

/// Build the spec for `root` and write it to the configured path.
///
/// Returns the path written.
pub fn emit_spec<C: CommandSource>(
    root: &C,
    version: &str,
    config: &ExportConfig,
) -> Result<PathBuf> {
    let spec = SpecEnvelope::build(root, version, config);
    let mut json = Vec::new();
    write_spec(&spec, &mut json)?;

    let path = config.spec_path();
    ensure_dir(&config.output_dir)?;
    write_file(&path, &json)?;

    info!(
        "Wrote spec for {} commands to {}",
        spec.command_count() + 1,
        path.display()
    );
    Ok(path)
}
