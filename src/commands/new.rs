//! `ado new [folder/] <action...> [due+2w] [remind+1d] [[project]]`

use anyhow::{Context, Result};

use crate::commands::{resolve_project, CommandContext};
use crate::parser::{presets, ParsedArgs, Parser};

/// Date tags and the project reference are scanners registered before
/// the title, so they are stripped out of the token stream wherever
/// they appear; the positional title then absorbs everything left.
pub fn schema(ctx: &CommandContext) -> Parser {
    Parser::new()
        .argument(presets::folder("folder", &ctx.folders()))
        .argument(presets::due_date("due"))
        .argument(presets::remind_date("remind"))
        .argument(presets::project("parent"))
        .argument(presets::joined_text("action"))
}

pub fn run(ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    let folder = args
        .text("folder")
        .unwrap_or(&ctx.config.default_folder)
        .to_string();
    let parent_id = match args.project("parent") {
        Some(reference) => Some(resolve_project(&ctx.db, &ctx.folders(), reference)?.id),
        None => None,
    };
    let action = args.text("action").context("a todo needs some text")?;

    let id = ctx
        .db
        .add_todo(action, &folder, args.date("due"), args.date("remind"), parent_id)?;
    println!("Added #{id} to {folder}/: {action}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use crate::parser::tokens;

    #[test]
    fn creates_a_todo_in_the_named_folder() {
        let mut ctx = test_context();
        let args = schema(&ctx).parse(&tokens("today/ Buy milk")).unwrap();
        assert_eq!(args.text("folder"), Some("today"));
        assert_eq!(args.text("action"), Some("Buy milk"));
        assert_eq!(args.date("due"), None);
        assert_eq!(args.date("remind"), None);
        assert_eq!(args.project("parent"), None);

        run(&mut ctx, &args).unwrap();
        let todos = ctx.db.list_todos(&Default::default()).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].folder, "today");
        assert_eq!(todos[0].action, "Buy milk");
    }

    #[test]
    fn falls_back_to_the_configured_default_folder() {
        let mut ctx = test_context();
        let args = schema(&ctx).parse(&tokens("water the plants")).unwrap();
        run(&mut ctx, &args).unwrap();
        let todos = ctx.db.list_todos(&Default::default()).unwrap();
        assert_eq!(todos[0].folder, "inbox");
    }

    #[test]
    fn date_tags_are_lifted_out_of_the_title() {
        let mut ctx = test_context();
        let args = schema(&ctx).parse(&tokens("pay rent due+3d remind+1d")).unwrap();
        run(&mut ctx, &args).unwrap();
        let todos = ctx.db.list_todos(&Default::default()).unwrap();
        assert_eq!(todos[0].action, "pay rent");
        assert!(todos[0].due.is_some());
        assert!(todos[0].remind.is_some());
    }

    #[test]
    fn a_project_reference_links_the_parent() {
        let mut ctx = test_context();
        let parent = ctx.db.add_todo("spring cleaning", "someday", None, None, None).unwrap();

        let args = schema(&ctx).parse(&tokens("wash [cleaning] windows")).unwrap();
        run(&mut ctx, &args).unwrap();

        let todos = ctx.db.list_todos(&Default::default()).unwrap();
        let child = todos.iter().find(|t| t.action == "wash windows").unwrap();
        assert_eq!(child.parent_id, Some(parent));
    }

    #[test]
    fn a_dangling_project_reference_is_an_error() {
        let mut ctx = test_context();
        let args = schema(&ctx).parse(&tokens("wash [nothing here] windows")).unwrap();
        assert!(run(&mut ctx, &args).is_err());
    }
}
