//! `ado setup init` — create the schema and the standard folders.

use anyhow::Result;

use crate::commands::CommandContext;
use crate::db::DEFAULT_FOLDERS;
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(_ctx: &CommandContext) -> Parser {
    Parser::new().argument(presets::switch("sub", &["init"]))
}

pub fn run(ctx: &mut CommandContext, _args: &ParsedArgs) -> Result<()> {
    // Opening the database already created the tables; this fills in
    // the standard folders.
    let created = ctx.db.ensure_default_folders()?;
    match created {
        0 => println!("Already set up ({} folders)", ctx.folders().len()),
        n => println!(
            "Set up {n} folder(s): {}",
            DEFAULT_FOLDERS.join("/, ") + "/"
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandContext;
    use crate::config::Config;
    use crate::db::Database;
    use crate::parser::tokens;

    #[test]
    fn init_creates_the_standard_folders() {
        let mut ctx = CommandContext {
            db: Database::open_in_memory().unwrap(),
            config: Config::default(),
            raw_args: Vec::new(),
        };
        let args = schema(&ctx).parse(&tokens("init")).unwrap();
        run(&mut ctx, &args).unwrap();
        for name in DEFAULT_FOLDERS {
            assert!(ctx.folders().iter().any(|f| f == name));
        }

        // Idempotent.
        run(&mut ctx, &args).unwrap();
        assert_eq!(ctx.folders().len(), DEFAULT_FOLDERS.len());
    }

    #[test]
    fn setup_requires_a_known_subcommand() {
        let ctx = CommandContext {
            db: Database::open_in_memory().unwrap(),
            config: Config::default(),
            raw_args: Vec::new(),
        };
        assert!(schema(&ctx).parse(&tokens("teardown")).is_err());
        assert!(schema(&ctx).parse(&[]).is_err());
    }
}
