//! Hidden generator subcommands for host CLIs
//!
//! A host flattens [`GenerateCommand`] into its own subcommand enum:
//!
//! ```ignore
//! #[derive(Subcommand)]
//! enum Commands {
//!     Build { /* ... */ },
//!     #[command(flatten)]
//!     Generate(clispec::GenerateCommand),
//! }
//! ```
//!
//! and dispatches with the live tree from `Cli::command()`.

use clap::Subcommand;
use std::io::Write;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::markdown::emit_docs;
use crate::source::CommandSource;
use crate::spec::emit_spec;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateCommand {
    /// Generate API spec based on the command tree
    #[command(
        name = "generate-spec",
        hide = true,
        long_about = "Generate API spec docs based on the command tree"
    )]
    GenerateSpec,

    /// Generate markdown docs based on the command tree
    #[command(
        name = "generate-docs",
        hide = true,
        long_about = "Generate markdown docs based on the command tree"
    )]
    GenerateDocs,
}

impl GenerateCommand {
    /// Line printed when the generator starts; nothing else goes to stdout
    pub fn status(self) -> &'static str {
        match self {
            Self::GenerateSpec => "Generating specification",
            Self::GenerateDocs => "Generating documentation",
        }
    }

    /// Export the tree rooted at `root`
    pub fn run<C: CommandSource>(self, root: &C, version: &str, config: &ExportConfig) -> Result<()> {
        self.run_with_output(root, version, config, &mut std::io::stdout())
    }

    /// [`run`](Self::run), printing the status line to `out`
    pub fn run_with_output<C, W>(
        self,
        root: &C,
        version: &str,
        config: &ExportConfig,
        out: &mut W,
    ) -> Result<()>
    where
        C: CommandSource,
        W: Write,
    {
        writeln!(out, "{}", self.status()).map_err(ExportError::Output)?;
        match self {
            Self::GenerateSpec => {
                emit_spec(root, version, config)?;
            }
            Self::GenerateDocs => {
                emit_docs(root, config)?;
            }
        }
        Ok(())
    }
}
