//! `ado done <index>` — file the indexed todo into the done folder.

use anyhow::Result;

use crate::commands::{todo_at, CommandContext};
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(_ctx: &CommandContext) -> Parser {
    Parser::new().argument(presets::index("index"))
}

pub fn run(ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    let index = args.index("index").unwrap_or_default();
    let todo = todo_at(ctx, index)?;
    ctx.db.move_todo(todo.id, "done")?;
    println!("Done: {}", todo.action);
    Ok(())
}
