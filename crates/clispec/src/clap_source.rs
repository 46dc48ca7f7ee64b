//! clap adapter for the exporters
//!
//! clap has no notion of string annotations or deprecated commands, so those
//! come from an [`Annotations`] table keyed by command path
//! (`"samplectl context ls"`). Everything else is read straight off the
//! `clap::Command` / `clap::Arg` objects.

use clap::{Arg, ArgAction, Command};
use clap_markdown::MarkdownOptions;
use std::collections::HashMap;

use crate::source::{non_empty, CommandSource, FlagSource};
use crate::walker::STABILITY_ANNOTATION;

/// Extra per-command metadata clap cannot carry
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    commands: HashMap<String, CommandAnnotations>,
}

#[derive(Debug, Clone, Default)]
struct CommandAnnotations {
    values: HashMap<String, String>,
    deprecated: Option<String>,
    flags: HashMap<String, String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a string annotation to the command at `path`
    pub fn annotate(mut self, path: &str, key: &str, value: &str) -> Self {
        self.entry(path)
            .values
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Set the stability tag of the command at `path`
    pub fn stability(self, path: &str, level: &str) -> Self {
        self.annotate(path, STABILITY_ANNOTATION, level)
    }

    /// Mark the command at `path` as deprecated
    pub fn deprecate(mut self, path: &str, message: &str) -> Self {
        self.entry(path).deprecated = Some(message.to_string());
        self
    }

    /// Mark flag `flag` of the command at `path` as deprecated
    pub fn deprecate_flag(mut self, path: &str, flag: &str, message: &str) -> Self {
        self.entry(path)
            .flags
            .insert(flag.to_string(), message.to_string());
        self
    }

    pub fn get(&self, path: &str, key: &str) -> Option<&str> {
        self.commands
            .get(path)
            .and_then(|c| c.values.get(key))
            .map(String::as_str)
    }

    fn command_deprecation(&self, path: &str) -> Option<&str> {
        self.commands.get(path).and_then(|c| c.deprecated.as_deref())
    }

    fn flag_deprecation(&self, path: &str, flag: &str) -> Option<&str> {
        self.commands
            .get(path)
            .and_then(|c| c.flags.get(flag))
            .map(String::as_str)
    }

    fn entry(&mut self, path: &str) -> &mut CommandAnnotations {
        self.commands.entry(path.to_string()).or_default()
    }
}

/// A `clap::Command` positioned in its tree
#[derive(Debug, Clone)]
pub struct ClapCommand<'a> {
    command: &'a Command,
    annotations: &'a Annotations,
    path: String,
}

impl<'a> ClapCommand<'a> {
    /// Wrap a root command
    pub fn new(command: &'a Command, annotations: &'a Annotations) -> Self {
        Self {
            command,
            annotations,
            path: command.get_name().to_string(),
        }
    }

    /// Space-joined names from the root down to this command
    pub fn path(&self) -> &str {
        &self.path
    }

    fn flag(&self, arg: &'a Arg) -> ClapFlag<'a> {
        let name = flag_name(arg);
        ClapFlag {
            arg,
            deprecated: self
                .annotations
                .flag_deprecation(&self.path, name)
                .map(str::to_string),
        }
    }

    fn own_flags(&self) -> impl Iterator<Item = &'a Arg> {
        self.command
            .get_arguments()
            .filter(|arg| !arg.is_positional() && !is_generated(arg))
    }
}

impl<'a> CommandSource for ClapCommand<'a> {
    type Flag = ClapFlag<'a>;

    fn usage(&self) -> String {
        let mut usage = self.command.get_name().to_string();
        for arg in self.command.get_positionals() {
            let placeholder = placeholder(arg);
            if arg.is_required_set() {
                usage.push_str(&format!(" <{}>", placeholder));
            } else {
                usage.push_str(&format!(" [{}]", placeholder));
            }
        }
        usage
    }

    fn short(&self) -> String {
        self.command
            .get_about()
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    fn long(&self) -> String {
        self.command
            .get_long_about()
            .or_else(|| self.command.get_about())
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    fn aliases(&self) -> Vec<String> {
        self.command
            .get_all_aliases()
            .map(str::to_string)
            .collect()
    }

    fn deprecated(&self) -> Option<String> {
        self.annotations
            .command_deprecation(&self.path)
            .map(str::to_string)
    }

    fn annotation(&self, key: &str) -> Option<String> {
        self.annotations.get(&self.path, key).map(str::to_string)
    }

    fn is_hidden(&self) -> bool {
        self.command.is_hide_set()
    }

    fn is_runnable(&self) -> bool {
        !self.command.is_subcommand_required_set()
    }

    fn children(&self) -> Vec<Self> {
        self.command
            .get_subcommands()
            .map(|child| ClapCommand {
                command: child,
                annotations: self.annotations,
                path: format!("{} {}", self.path, child.get_name()),
            })
            .collect()
    }

    fn local_flags(&self) -> Vec<Self::Flag> {
        self.own_flags().map(|arg| self.flag(arg)).collect()
    }

    fn help_markdown(&self, omit: &[String]) -> String {
        // bin_name makes clap_markdown title and usage show the full path
        let mut command = self.command.clone().bin_name(self.path.clone());
        for name in omit {
            command = command.mut_subcommand(name, |sub| sub.hide(true));
        }

        let deprecated: Vec<String> = self
            .own_flags()
            .filter(|arg| self.flag(*arg).deprecated().and_then(non_empty).is_some())
            .map(|arg| arg.get_id().as_str().to_string())
            .collect();
        for id in deprecated {
            command = command.mut_arg(id, |arg| arg.hide(true));
        }

        let options = MarkdownOptions::new()
            .show_footer(false)
            .show_table_of_contents(false);
        own_section(
            &clap_markdown::help_markdown_command_custom(&command, &options),
            &self.path,
        )
    }
}

/// A `clap::Arg` together with its deprecation notice
#[derive(Debug, Clone)]
pub struct ClapFlag<'a> {
    arg: &'a Arg,
    deprecated: Option<String>,
}

impl FlagSource for ClapFlag<'_> {
    fn name(&self) -> String {
        flag_name(self.arg).to_string()
    }

    fn shorthand(&self) -> Option<char> {
        self.arg.get_short()
    }

    fn usage(&self) -> String {
        self.arg
            .get_help()
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    fn default_value(&self) -> String {
        self.arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn deprecated(&self) -> Option<String> {
        self.deprecated.clone()
    }
}

fn flag_name(arg: &Arg) -> &str {
    arg.get_long().unwrap_or_else(|| arg.get_id().as_str())
}

fn placeholder(arg: &Arg) -> String {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.to_string())
        .unwrap_or_else(|| arg.get_id().as_str().to_uppercase())
}

/// clap's own help/version switches, present only on built commands
fn is_generated(arg: &Arg) -> bool {
    matches!(
        arg.get_action(),
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

/// clap_markdown appends a section per visible subcommand; keep everything
/// up to the end of the section for `path`
fn own_section(markdown: &str, path: &str) -> String {
    let heading = format!("## `{}`", path);
    let end = markdown
        .find(&heading)
        .and_then(|start| {
            let body = start + heading.len();
            markdown[body..]
                .find("\n## `")
                .map(|offset| body + offset + 1)
        })
        .unwrap_or(markdown.len());
    format!("{}\n", markdown[..end].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Command {
        Command::new("root")
            .about("Root command")
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .short('v')
                    .global(true)
                    .action(ArgAction::SetTrue)
                    .help("Verbose output"),
            )
            .subcommand(
                Command::new("add")
                    .about("Add an item")
                    .long_about("Add an item to the store")
                    .visible_aliases(["a", "new"])
                    .arg(Arg::new("id").required(true))
                    .arg(Arg::new("label").value_name("LABEL"))
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .short('o')
                            .value_name("DIR")
                            .default_value(".")
                            .help("Output directory"),
                    ),
            )
            .subcommand(
                Command::new("group")
                    .subcommand_required(true)
                    .subcommand(Command::new("leaf")),
            )
    }

    #[test]
    fn test_usage_includes_positionals() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);
        let children = root.children();

        assert_eq!(root.usage(), "root");
        assert_eq!(children[0].usage(), "add <ID> [LABEL]");
        assert_eq!(children[0].name(), "add");
    }

    #[test]
    fn test_descriptions_and_aliases() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);
        let add = &root.children()[0];

        assert_eq!(root.short(), "Root command");
        assert_eq!(root.long(), "Root command");
        assert_eq!(add.long(), "Add an item to the store");
        assert_eq!(add.aliases(), vec!["a".to_string(), "new".to_string()]);
    }

    #[test]
    fn test_global_flags_stay_local_to_owner() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);
        let add = &root.children()[0];
        let leaf = &root.children()[1].children()[0];

        let local: Vec<String> = add.local_flags().iter().map(|f| f.name()).collect();
        assert_eq!(local, vec!["out".to_string()]);

        let local: Vec<String> = root.local_flags().iter().map(|f| f.name()).collect();
        assert_eq!(local, vec!["verbose".to_string()]);
        assert!(leaf.local_flags().is_empty());
        assert_eq!(leaf.path(), "root group leaf");
    }

    #[test]
    fn test_flag_fields() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);
        let flags = root.children()[0].local_flags();
        let out = &flags[0];

        assert_eq!(out.shorthand(), Some('o'));
        assert_eq!(out.usage(), "Output directory");
        assert_eq!(out.default_value(), ".");

        let verbose = &root.local_flags()[0];
        assert_eq!(verbose.shorthand(), Some('v'));
        assert_eq!(verbose.default_value(), "");
    }

    #[test]
    fn test_annotations_by_path() {
        let cmd = tree();
        let annotations = Annotations::new()
            .stability("root add", "experimental")
            .deprecate("root group", "use add instead")
            .deprecate_flag("root add", "out", "use --dest");
        let root = ClapCommand::new(&cmd, &annotations);
        let children = root.children();

        assert_eq!(children[0].path(), "root add");
        assert_eq!(
            children[0].annotation(STABILITY_ANNOTATION),
            Some("experimental".to_string())
        );
        assert_eq!(root.annotation(STABILITY_ANNOTATION), None);
        assert_eq!(children[1].deprecated(), Some("use add instead".to_string()));
        assert_eq!(
            children[0].local_flags()[0].deprecated(),
            Some("use --dest".to_string())
        );
    }

    #[test]
    fn test_runnable() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);
        let children = root.children();

        assert!(children[0].is_runnable());
        assert!(!children[1].is_runnable());
    }

    #[test]
    fn test_help_markdown_is_own_section() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);

        let add = root.children()[0].help_markdown(&[]);
        assert!(add.contains("## `root add`"));
        assert!(add.contains("**Usage:** `root add"));
        assert!(add.contains("Add an item to the store"));
        assert!(add.contains("--out"));

        let page = root.help_markdown(&[]);
        assert!(page.contains("## `root`"));
        assert!(page.contains("* `add`"));
        assert!(page.contains("* `group`"));
        assert!(!page.contains("## `root add`"));
        assert!(!page.contains("## `root group`"));
        assert!(page.ends_with('\n'));
    }

    #[test]
    fn test_help_markdown_omits_children() {
        let cmd = tree();
        let annotations = Annotations::new();
        let root = ClapCommand::new(&cmd, &annotations);

        let page = root.help_markdown(&["group".to_string()]);
        assert!(page.contains("* `add`"));
        assert!(!page.contains("* `group`"));
    }

    #[test]
    fn test_help_markdown_hides_deprecated_flags() {
        let cmd = tree();

        let annotations = Annotations::new().deprecate_flag("root add", "out", "use --dest");
        let root = ClapCommand::new(&cmd, &annotations);
        assert!(!root.children()[0].help_markdown(&[]).contains("--out"));

        // an empty notice is not a deprecation
        let annotations = Annotations::new().deprecate_flag("root add", "out", "");
        let root = ClapCommand::new(&cmd, &annotations);
        assert!(root.children()[0].help_markdown(&[]).contains("--out"));
    }
}
