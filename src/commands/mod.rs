//! Command handlers.
//!
//! Each submodule owns one command: its argument schema (built from the
//! parser presets) and the handler that runs against the parsed values.
//! Shared plumbing lives here: the context handed to every handler and
//! the helpers for resolving references and printing listings.

pub mod done;
pub mod folder;
pub mod help;
pub mod list;
pub mod mv;
pub mod new;
pub mod setup;
pub mod version;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::db::{Database, Todo, TodoFilter};
use crate::parser::ProjectRef;

/// Everything a handler needs: open storage, configuration, and the
/// raw tokens of the current subcommand (kept so `list` can persist
/// them as a saved search).
pub struct CommandContext {
    pub db: Database,
    pub config: Config,
    pub raw_args: Vec<String>,
}

impl CommandContext {
    /// Folder names for schema construction; before `setup init` this
    /// is simply empty and folder references cannot match.
    pub fn folders(&self) -> Vec<String> {
        self.db.folder_names().unwrap_or_default()
    }
}

/// Expand a folder abbreviation to its full name, with the same
/// diagnostics the parser's folder matcher produces.
pub fn resolve_folder(folders: &[String], prefix: &str) -> Result<String> {
    let lowered = prefix.to_lowercase();
    let mut candidates = folders.iter().filter(|f| f.to_lowercase().starts_with(&lowered));
    match (candidates.next(), candidates.next()) {
        (Some(folder), None) => Ok(folder.clone()),
        (None, _) => anyhow::bail!("No match found for folder {prefix}/"),
        (Some(_), Some(_)) => anyhow::bail!("Multiple matches found for folder {prefix}/"),
    }
}

/// Find the single existing todo a `[folder/keywords]` reference names.
pub fn resolve_project(db: &Database, folders: &[String], reference: &ProjectRef) -> Result<Todo> {
    let folder = match &reference.folder {
        Some(prefix) => Some(resolve_folder(folders, prefix)?),
        None => None,
    };
    let filter = TodoFilter {
        folder,
        keywords: reference.keywords.clone(),
        ..Default::default()
    };
    let mut matches = db.list_todos(&filter)?;
    let shown = reference.keywords.join(" ");
    match matches.len() {
        0 => anyhow::bail!("No match found for project [{shown}]"),
        1 => Ok(matches.remove(0)),
        _ => anyhow::bail!("Multiple matches found for project [{shown}]"),
    }
}

/// The todo the user pointed at with a listing index.
pub fn todo_at(ctx: &CommandContext, index: usize) -> Result<Todo> {
    ctx.db
        .listed_todo(index)?
        .with_context(|| format!("no item {index} in the last listing (run 'ado list' first)"))
}

/// Print todos as numbered rows and remember the ordering so index
/// commands can refer back to it.
pub fn print_listing(ctx: &CommandContext, todos: &[Todo]) -> Result<()> {
    if todos.is_empty() {
        println!("No todos found.");
    }
    for (i, todo) in todos.iter().enumerate() {
        let mut line = format!("{:>3}. [{}] {}", i + 1, todo.folder, todo.action);
        if let Some(due) = todo.due {
            line.push_str(&format!(" (due {due})"));
        }
        if let Some(remind) = todo.remind {
            line.push_str(&format!(" (remind {remind})"));
        }
        if let Some(parent_id) = todo.parent_id {
            line.push_str(&format!(" (sub of #{parent_id})"));
        }
        println!("{line}");
    }
    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    ctx.db.record_listing(&ids)
}

#[cfg(test)]
pub(crate) fn test_context() -> CommandContext {
    let db = Database::open_in_memory().unwrap();
    db.ensure_default_folders().unwrap();
    CommandContext {
        db,
        config: Config::default(),
        raw_args: Vec::new(),
    }
}
