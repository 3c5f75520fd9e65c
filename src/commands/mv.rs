//! `ado move <index> folder/` or `ado move <index> [project]`
//!
//! Re-homes the todo printed at `<index>` in the last listing: into a
//! folder, or under a new parent project.

use anyhow::Result;

use crate::commands::{resolve_project, todo_at, CommandContext};
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(ctx: &CommandContext) -> Parser {
    Parser::new()
        .argument(presets::index("index"))
        .argument(presets::folder("folder", &ctx.folders()))
        .argument(presets::project("parent"))
}

pub fn run(ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    // The index preset is exactly-one, so a value is always present.
    let index = args.index("index").unwrap_or_default();
    let todo = todo_at(ctx, index)?;

    match (args.text("folder"), args.project("parent")) {
        (Some(folder), None) => {
            ctx.db.move_todo(todo.id, folder)?;
            println!("Moved '{}' to {folder}/", todo.action);
        }
        (None, Some(reference)) => {
            let parent = resolve_project(&ctx.db, &ctx.folders(), reference)?;
            if parent.id == todo.id {
                anyhow::bail!("a todo cannot be its own parent");
            }
            ctx.db.set_parent(todo.id, parent.id)?;
            println!("Moved '{}' under '{}'", todo.action, parent.action);
        }
        (None, None) => anyhow::bail!("move needs a folder/ or [project] target"),
        (Some(_), Some(_)) => anyhow::bail!("give either a folder/ or a [project], not both"),
    }
    Ok(())
}
