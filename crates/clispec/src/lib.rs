//! clispec - Export a CLI's command tree
//!
//! Walks the live command tree of a running program and writes it out two
//! ways: a JSON spec (`docs/spec.json`) describing every command and flag,
//! and one markdown page per command with YAML front matter for a docs site.
//!
//! Host programs embed the hidden `generate-spec` and `generate-docs`
//! subcommands through [`GenerateCommand`]. The exporters read commands
//! through the [`CommandSource`] trait; [`ClapCommand`] adapts clap.

pub mod clap_source;
pub mod command;
pub mod config;
pub mod error;
pub mod flags;
pub mod markdown;
pub mod output;
pub mod source;
pub mod spec;
pub mod walker;

pub use clap_source::{Annotations, ClapCommand, ClapFlag};
pub use command::GenerateCommand;
pub use config::{ExportConfig, FrontMatter};
pub use error::{ExportError, Result};
pub use flags::{extract_flags, FlagSpec};
pub use markdown::{emit_docs, gen_markdown_tree_custom, render_tree, MarkdownPage};
pub use source::{canonical_name, CommandSource, FlagSource};
pub use spec::{emit_spec, normalize_version, write_spec, SpecEnvelope, CLISPEC_VERSION};
pub use walker::{walk, CommandNode, STABILITY_ANNOTATION};
