//! `ado folder new|rename|delete|list [names...]`

use anyhow::Result;

use crate::commands::CommandContext;
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(_ctx: &CommandContext) -> Parser {
    Parser::new()
        .argument(presets::switch("sub", &["new", "rename", "delete", "list"]))
        .argument(presets::catch_all("names"))
}

pub fn run(ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    let sub = args.text("sub").unwrap_or_default();
    let names = args.list("names");
    match sub {
        "new" => {
            if names.is_empty() {
                anyhow::bail!("folder new needs at least one name");
            }
            for name in names {
                if name.contains(['/', '[', ']']) {
                    anyhow::bail!("folder name '{name}' must not contain '/', '[' or ']'");
                }
                ctx.db.create_folder(name)?;
                println!("Created folder {name}/");
            }
        }
        "rename" => {
            let [old, new] = names else {
                anyhow::bail!("folder rename needs exactly two names: <old> <new>");
            };
            if new.contains(['/', '[', ']']) {
                anyhow::bail!("folder name '{new}' must not contain '/', '[' or ']'");
            }
            ctx.db.rename_folder(old, new)?;
            println!("Renamed folder {old}/ to {new}/");
        }
        "delete" => {
            if names.is_empty() {
                anyhow::bail!("folder delete needs at least one name");
            }
            let fallback = ctx.config.default_folder.clone();
            for name in names {
                if *name == fallback {
                    anyhow::bail!("cannot delete the default folder {fallback}/");
                }
                let moved = ctx.db.delete_folder(name, &fallback)?;
                match moved {
                    0 => println!("Deleted folder {name}/"),
                    n => println!("Deleted folder {name}/, moved {n} todo(s) to {fallback}/"),
                }
            }
        }
        "list" => {
            if !names.is_empty() {
                anyhow::bail!("folder list takes no arguments");
            }
            for name in ctx.folders() {
                println!("{name}/");
            }
        }
        _ => unreachable!("switch only yields known subcommands"),
    }
    Ok(())
}
