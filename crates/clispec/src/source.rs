//! The narrow view of a command tree that every exporter reads
//!
//! Exporters never touch a CLI framework directly. Anything that can answer
//! these questions about its commands and flags can be exported; the clap
//! adapter lives in [`crate::clap_source`].

/// A single flag as seen by the exporters
pub trait FlagSource {
    /// Primary (long) name, without leading dashes
    fn name(&self) -> String;

    /// Single-character shorthand, if any
    fn shorthand(&self) -> Option<char>;

    /// Help text
    fn usage(&self) -> String;

    /// Default value in the textual form the framework displays
    fn default_value(&self) -> String;

    /// Deprecation notice, if the flag is deprecated
    fn deprecated(&self) -> Option<String>;
}

/// A single command as seen by the exporters
pub trait CommandSource: Sized {
    type Flag: FlagSource;

    /// Usage string; its first token is the command's name (`add <ID>`)
    fn usage(&self) -> String;

    /// One-line description
    fn short(&self) -> String;

    /// Full description
    fn long(&self) -> String;

    /// Aliases in declaration order
    fn aliases(&self) -> Vec<String>;

    fn deprecated(&self) -> Option<String>;

    /// Look up a string annotation
    fn annotation(&self, key: &str) -> Option<String>;

    fn is_hidden(&self) -> bool;

    /// Whether the command does something on its own rather than only
    /// grouping subcommands
    fn is_runnable(&self) -> bool;

    /// Direct children in the order the framework returns them
    fn children(&self) -> Vec<Self>;

    /// Flags defined on this command itself
    fn local_flags(&self) -> Vec<Self::Flag>;

    /// Markdown help for this command alone (not its subcommands' sections).
    /// Children named in `omit` are left out of the subcommand listing.
    fn help_markdown(&self, omit: &[String]) -> String;

    /// Canonical name: the first whitespace-delimited token of the usage string
    fn name(&self) -> String {
        canonical_name(&self.usage()).to_string()
    }
}

/// First whitespace-delimited token of a usage string.
///
/// An empty (or all-whitespace) usage string yields `""`.
pub fn canonical_name(usage: &str) -> &str {
    usage.split_whitespace().next().unwrap_or("")
}

/// Turn an empty string into `None`
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_takes_first_token() {
        assert_eq!(canonical_name("add <name>"), "add");
        assert_eq!(canonical_name("  ls   [FILTER] "), "ls");
        assert_eq!(canonical_name("build"), "build");
    }

    #[test]
    fn test_canonical_name_empty_usage() {
        assert_eq!(canonical_name(""), "");
        assert_eq!(canonical_name("   "), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
