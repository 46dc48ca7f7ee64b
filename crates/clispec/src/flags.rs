//! Flag extraction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::source::{non_empty, FlagSource};

/// One flag in the exported spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Single-character shorthand
    #[serde(rename = "alias", default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<String>,

    /// Help text
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Default value as displayed by the CLI framework
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl FlagSpec {
    pub fn from_flag<F: FlagSource>(flag: &F) -> Self {
        Self {
            shorthand: flag.shorthand().map(String::from),
            usage: non_empty(flag.usage()),
            default: non_empty(flag.default_value()),
            deprecated: flag.deprecated().and_then(non_empty),
        }
    }
}

/// Map each flag's primary name to its spec.
///
/// Callers pass a command's local flags only; inherited flags belong to the
/// ancestor that defines them.
pub fn extract_flags<F: FlagSource>(flags: &[F]) -> BTreeMap<String, FlagSpec> {
    flags
        .iter()
        .map(|flag| (flag.name(), FlagSpec::from_flag(flag)))
        .collect()
}
