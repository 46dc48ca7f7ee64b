//! samplectl - Sample host for the clispec generators
//!
//! A small CLI with a realistic command tree (nested groups, aliases,
//! positional arguments, global flags) that embeds the hidden
//! `generate-spec` and `generate-docs` subcommands. Its own commands only
//! report what they were asked to do.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clispec::{Annotations, ClapCommand, ExportConfig, GenerateCommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(name = "samplectl")]
#[command(version)]
#[command(about = "Manage apps and contexts")]
#[command(long_about = "samplectl manages apps and the contexts they are deployed to.")]
struct Cli {
    /// Path to a clispec config file (default: ./.clispec.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an app
    #[command(after_help = "\
samplectl build ./my-app
samplectl build ./my-app --out dist")]
    Build {
        /// App directory
        path: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out: String,

        /// Return without waiting for the build to finish
        #[arg(long)]
        no_wait: bool,
    },

    /// Manage contexts
    Context {
        #[command(subcommand)]
        command: ContextCommands,
    },

    #[command(flatten)]
    Generate(GenerateCommand),
}

#[derive(Subcommand)]
enum ContextCommands {
    /// List contexts
    #[command(visible_aliases = ["ls", "list"])]
    Items,

    /// Show a context
    Get {
        /// Context name
        name: String,
    },

    /// Remove a context
    #[command(visible_alias = "remove")]
    Rm {
        /// Context name
        name: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Metadata clap cannot express, keyed by command path
fn annotations() -> Annotations {
    Annotations::new()
        .stability("samplectl", "experimental")
        .stability("samplectl context", "stable")
        .deprecate("samplectl context rm", "use 'samplectl context delete' once available")
        .deprecate_flag("samplectl build", "no-wait", "builds are always asynchronous now")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    run_command(cli)
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build { path, out, no_wait } => cmd_build(&path, &out, no_wait),
        Commands::Context { command } => cmd_context(command),
        Commands::Generate(generate) => cmd_generate(generate, cli.config),
    }
}

fn cmd_build(path: &Path, out: &str, no_wait: bool) -> Result<()> {
    println!(
        "{} {} -> {}{}",
        "Build:".bold(),
        path.display(),
        out.cyan(),
        if no_wait { " (not waiting)" } else { "" }
    );
    Ok(())
}

fn cmd_context(command: ContextCommands) -> Result<()> {
    match command {
        ContextCommands::Items => println!("{}", "No contexts configured".yellow()),
        ContextCommands::Get { name } => println!("{} {}", "Context:".bold(), name.cyan()),
        ContextCommands::Rm { name, force } => println!(
            "{} {}{}",
            "Remove:".bold(),
            name.cyan(),
            if force { " (forced)" } else { "" }
        ),
    }
    Ok(())
}

fn cmd_generate(generate: GenerateCommand, config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path {
        Some(path) => ExportConfig::load_from(&path)?,
        None => ExportConfig::load()?,
    };

    let root = Cli::command();
    let annotations = annotations();
    generate
        .run(&ClapCommand::new(&root, &annotations), VERSION, &config)
        .with_context(|| format!("Failed to run {:?}", generate))
}
