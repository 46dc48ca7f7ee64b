//! Markdown doc emitter
//!
//! One page per available command, named after the command path with spaces
//! replaced by underscores (`samplectl_context_ls.md`). Each page is whatever
//! the prepender returns for its file name followed by the command's
//! clap_markdown help; subcommand entries link through the link handler.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ExportConfig, FrontMatter};
use crate::error::Result;
use crate::output::{ensure_dir, write_file};
use crate::source::{non_empty, CommandSource};

/// A rendered page, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPage {
    pub path: PathBuf,
    pub contents: String,
}

/// Title derived from a page file name: `my_command.md` -> `my command`
pub fn title_from_filename(filename: &str) -> String {
    let base = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.replace('_', " ")
}

/// YAML front matter for a page
pub fn front_matter(filename: &str, fields: &FrontMatter) -> String {
    let title = title_from_filename(filename);
    format!(
        "---\ntitle: \"{title}\"\ndescription: \"{title}\"\ncategories: {}\ntype: {}\ntags: {}\nproducts: {}\n---\n",
        fields.categories, fields.doc_type, fields.tags, fields.products
    )
}

/// Site link for a page: `my_command.md` -> `<prefix>my-command`
pub fn doc_link(name: &str, prefix: &str) -> String {
    let base = match name.rfind('.') {
        Some(idx) if !name[idx..].contains('/') => &name[..idx],
        _ => name,
    };
    format!("{}{}", prefix, base.replace('_', "-").to_lowercase())
}

/// Render the page of every available command under (and including) `root`
pub fn render_tree<C, P, L>(root: &C, dir: &Path, prepender: P, link_handler: L) -> Vec<MarkdownPage>
where
    C: CommandSource,
    P: Fn(&str) -> String,
    L: Fn(&str) -> String,
{
    let mut pages = Vec::new();
    render_into(root, None, dir, &prepender, &link_handler, &mut pages);
    pages
}

fn render_into<C, P, L>(
    command: &C,
    parent: Option<&str>,
    dir: &Path,
    prepender: &P,
    link_handler: &L,
    pages: &mut Vec<MarkdownPage>,
) where
    C: CommandSource,
    P: Fn(&str) -> String,
    L: Fn(&str) -> String,
{
    let path = match parent {
        Some(parent) => format!("{} {}", parent, command.name()),
        None => command.name(),
    };

    let (children, omitted): (Vec<C>, Vec<C>) =
        command.children().into_iter().partition(is_available);
    for child in &children {
        render_into(child, Some(&path), dir, prepender, link_handler, pages);
    }

    let file = dir.join(page_name(&path));
    debug!("Rendering {}", file.display());

    let omit: Vec<String> = omitted.iter().map(|c| c.name()).collect();
    let mut body = command.help_markdown(&omit);
    for child in &children {
        let name = child.name();
        let link = link_handler(&page_name(&format!("{} {}", path, name)));
        body = body.replacen(
            &format!("\n* `{}`", name),
            &format!("\n* [`{}`]({})", name, link),
            1,
        );
    }

    let mut contents = prepender(&file.to_string_lossy());
    contents.push_str(&body);
    pages.push(MarkdownPage {
        path: file,
        contents,
    });
}

/// Hidden and deprecated commands get no page and no link, and neither does
/// a group with nothing available under it
fn is_available<C: CommandSource>(command: &C) -> bool {
    !command.is_hidden()
        && command.deprecated().and_then(non_empty).is_none()
        && (command.is_runnable() || command.children().iter().any(is_available))
}

fn page_name(command_path: &str) -> String {
    format!("{}.md", command_path.replace(' ', "_"))
}

/// Write rendered pages, returning their paths
pub fn write_pages(pages: &[MarkdownPage]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        if let Some(dir) = page.path.parent() {
            ensure_dir(dir)?;
        }
        write_file(&page.path, page.contents.as_bytes())?;
        written.push(page.path.clone());
    }
    Ok(written)
}

/// Render and write the markdown tree for `root` into `dir`
pub fn gen_markdown_tree_custom<C, P, L>(
    root: &C,
    dir: &Path,
    prepender: P,
    link_handler: L,
) -> Result<Vec<PathBuf>>
where
    C: CommandSource,
    P: Fn(&str) -> String,
    L: Fn(&str) -> String,
{
    let pages = render_tree(root, dir, prepender, link_handler);
    write_pages(&pages)
}

/// Write the markdown tree using the configured front matter and link prefix
pub fn emit_docs<C: CommandSource>(root: &C, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    let written = gen_markdown_tree_custom(
        root,
        &config.output_dir,
        |filename| front_matter(filename, &config.front_matter),
        |name| doc_link(name, &config.link_prefix),
    )?;

    info!(
        "Wrote {} markdown pages to {}",
        written.len(),
        config.output_dir.display()
    );
    Ok(written)
}
