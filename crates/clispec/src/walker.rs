//! Command-tree walker
//!
//! Turns a live command tree into plain [`CommandNode`] records. Children are
//! keyed by their canonical name (first token of the usage string), so a
//! command registered with an empty usage string ends up under `""` and
//! collides with any sibling doing the same.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::flags::{extract_flags, FlagSpec};
use crate::source::{non_empty, CommandSource};

/// Annotation key holding a command's stability level
pub const STABILITY_ANNOTATION: &str = "x-qlik-stability";

/// One command in the exported spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandNode {
    /// Key of this node in its parent's map
    #[serde(skip)]
    pub name: String,

    /// First declared alias; later aliases are not exported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Long description
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,

    #[serde(rename = "x-qlik-stability", default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, FlagSpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandNode>,
}

impl CommandNode {
    /// Number of commands below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.commands
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Walk `command` and everything below it
pub fn walk<C: CommandSource>(command: &C) -> CommandNode {
    let name = command.name();
    debug!("Visiting command: {:?}", name);

    CommandNode {
        name,
        alias: first_alias(&command.aliases()),
        long: non_empty(command.long()),
        stability: stability(command),
        deprecated: command.deprecated().and_then(non_empty),
        flags: extract_flags(&command.local_flags()),
        commands: walk_children(command),
    }
}

/// Walk the direct children of `command`, keyed by canonical name
pub fn walk_children<C: CommandSource>(command: &C) -> BTreeMap<String, CommandNode> {
    command
        .children()
        .iter()
        .map(|child| {
            let node = walk(child);
            (node.name.clone(), node)
        })
        .collect()
}

/// Only the first alias survives the export
pub fn first_alias(aliases: &[String]) -> Option<String> {
    aliases.first().cloned().and_then(non_empty)
}

/// Stability level from the command's annotations
pub fn stability<C: CommandSource>(command: &C) -> Option<String> {
    command.annotation(STABILITY_ANNOTATION).and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clap_source::{Annotations, ClapCommand};
    use clap::{Arg, Command};

    fn tree() -> Command {
        Command::new("root")
            .arg(Arg::new("config").long("config").global(true))
            .subcommand(
                Command::new("context")
                    .about("Manage contexts")
                    .subcommand(
                        Command::new("items")
                            .visible_aliases(["ls", "list"])
                            .about("List contexts"),
                    )
                    .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                    .subcommand(Command::new("rm")),
            )
            .subcommand(Command::new("build").hide(true))
    }

    #[test]
    fn test_descendant_count() {
        let cmd = tree();
        let annotations = Annotations::new();
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        // root, context, items, add, rm, build
        assert_eq!(node.descendant_count(), 5);
    }

    #[test]
    fn test_first_alias_only() {
        let cmd = tree();
        let annotations = Annotations::new();
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        let items = &node.commands["context"].commands["items"];
        assert_eq!(items.alias.as_deref(), Some("ls"));
    }

    #[test]
    fn test_keyed_by_first_usage_token() {
        let cmd = tree();
        let annotations = Annotations::new();
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        let context = &node.commands["context"];
        assert!(context.commands.contains_key("add"));
        assert_eq!(context.commands["add"].name, "add");
    }

    #[test]
    fn test_hidden_commands_are_walked() {
        let cmd = tree();
        let annotations = Annotations::new();
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        assert!(node.commands.contains_key("build"));
    }

    #[test]
    fn test_metadata() {
        let cmd = tree();
        let annotations = Annotations::new()
            .stability("root context", "stable")
            .deprecate("root context rm", "use delete");
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        let context = &node.commands["context"];
        assert_eq!(context.stability.as_deref(), Some("stable"));
        assert_eq!(context.long.as_deref(), Some("Manage contexts"));
        assert_eq!(context.alias, None);
        assert_eq!(context.commands["rm"].deprecated.as_deref(), Some("use delete"));
    }

    #[test]
    fn test_inherited_flags_stay_on_owner() {
        let cmd = tree();
        let annotations = Annotations::new();
        let node = walk(&ClapCommand::new(&cmd, &annotations));

        assert!(node.flags.contains_key("config"));
        assert!(node.commands["context"].flags.is_empty());
    }

    #[test]
    fn test_first_alias_helper() {
        assert_eq!(first_alias(&[]), None);
        assert_eq!(
            first_alias(&["ls".to_string(), "list".to_string()]),
            Some("ls".to_string())
        );
    }
}
