//! `ado list [.name] [folder/] [keywords...] [due] [remind] [[project]]`
//!
//! Prints matching todos as numbered rows; the numbering is what
//! `done` and `move` index into. A leading `.name` token addresses a
//! saved search: alone it re-runs the stored query, combined with a
//! query it stores the query first. Queries are stored as their raw
//! tokens, so relative tags like `due+1w` stay relative to the day the
//! search runs.

use anyhow::{Context, Result};

use crate::commands::{print_listing, resolve_project, CommandContext};
use crate::db::TodoFilter;
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(ctx: &CommandContext) -> Parser {
    Parser::new()
        .argument(presets::search_file("file"))
        .argument(presets::folder("folder", &ctx.folders()))
        .argument(presets::due_date("due"))
        .argument(presets::remind_date("remind"))
        .argument(presets::project("parent"))
        .argument(presets::catch_all("keywords"))
}

pub fn run(ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    if let Some(name) = args.text("file") {
        let name = name.to_string();
        let query: Vec<String> = ctx
            .raw_args
            .iter()
            .filter(|t| !t.starts_with('.'))
            .cloned()
            .collect();
        if query.is_empty() {
            let saved = ctx
                .db
                .load_search(&name)?
                .with_context(|| format!("no saved search '.{name}'"))?;
            let parsed = schema(ctx).parse(&saved)?;
            return run_query(ctx, &parsed);
        }
        ctx.db.save_search(&name, &query)?;
        println!("Saved search '.{name}'");
    }
    run_query(ctx, args)
}

fn run_query(ctx: &CommandContext, args: &ParsedArgs) -> Result<()> {
    let parent_id = match args.project("parent") {
        Some(reference) => Some(resolve_project(&ctx.db, &ctx.folders(), reference)?.id),
        None => None,
    };
    let filter = TodoFilter {
        folder: args.text("folder").map(str::to_string),
        keywords: args.list("keywords").to_vec(),
        due_by: args.date("due"),
        remind_by: args.date("remind"),
        parent_id,
    };
    let todos = ctx.db.list_todos(&filter)?;
    print_listing(ctx, &todos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use crate::parser::tokens;
    use chrono::{Duration, Local};

    #[test]
    fn folder_and_keywords_narrow_the_listing() {
        let mut ctx = test_context();
        ctx.db.add_todo("buy milk", "today", None, None, None).unwrap();
        ctx.db.add_todo("buy stamps", "inbox", None, None, None).unwrap();

        let args = schema(&ctx).parse(&tokens("tod/ buy")).unwrap();
        run(&mut ctx, &args).unwrap();

        // The listing reflects exactly what matched.
        assert_eq!(ctx.db.listed_todo(1).unwrap().unwrap().action, "buy milk");
        assert!(ctx.db.listed_todo(2).unwrap().is_none());
    }

    #[test]
    fn bare_due_selects_anything_with_a_due_date() {
        let mut ctx = test_context();
        let soon = Local::now().date_naive() + Duration::days(3);
        ctx.db.add_todo("dated", "inbox", Some(soon), None, None).unwrap();
        ctx.db.add_todo("undated", "inbox", None, None, None).unwrap();

        let args = schema(&ctx).parse(&tokens("due")).unwrap();
        run(&mut ctx, &args).unwrap();

        assert_eq!(ctx.db.listed_todo(1).unwrap().unwrap().action, "dated");
        assert!(ctx.db.listed_todo(2).unwrap().is_none());
    }

    #[test]
    fn offset_due_is_a_deadline_window() {
        let mut ctx = test_context();
        let today = Local::now().date_naive();
        ctx.db.add_todo("this week", "inbox", Some(today + Duration::days(5)), None, None).unwrap();
        ctx.db.add_todo("next month", "inbox", Some(today + Duration::days(40)), None, None).unwrap();

        let args = schema(&ctx).parse(&tokens("due+1w")).unwrap();
        run(&mut ctx, &args).unwrap();

        assert_eq!(ctx.db.listed_todo(1).unwrap().unwrap().action, "this week");
        assert!(ctx.db.listed_todo(2).unwrap().is_none());
    }

    #[test]
    fn saved_searches_store_and_replay_raw_tokens() {
        let mut ctx = test_context();
        ctx.db.add_todo("buy milk", "today", None, None, None).unwrap();
        ctx.db.add_todo("call mom", "inbox", None, None, None).unwrap();

        ctx.raw_args = tokens(".errands today/ buy");
        let args = schema(&ctx).parse(&ctx.raw_args).unwrap();
        run(&mut ctx, &args).unwrap();
        assert_eq!(
            ctx.db.load_search("errands").unwrap(),
            Some(tokens("today/ buy"))
        );

        // Re-run by name alone.
        ctx.raw_args = tokens(".errands");
        let args = schema(&ctx).parse(&ctx.raw_args).unwrap();
        run(&mut ctx, &args).unwrap();
        assert_eq!(ctx.db.listed_todo(1).unwrap().unwrap().action, "buy milk");
        assert!(ctx.db.listed_todo(2).unwrap().is_none());
    }

    #[test]
    fn replaying_an_unknown_search_is_an_error() {
        let mut ctx = test_context();
        ctx.raw_args = tokens(".nope");
        let args = schema(&ctx).parse(&ctx.raw_args).unwrap();
        assert!(run(&mut ctx, &args).is_err());
    }

    #[test]
    fn project_filter_lists_sub_items() {
        let mut ctx = test_context();
        let parent = ctx.db.add_todo("spring cleaning", "someday", None, None, None).unwrap();
        ctx.db.add_todo("wash windows", "someday", None, None, Some(parent)).unwrap();

        let args = schema(&ctx).parse(&tokens("[cleaning]")).unwrap();
        run(&mut ctx, &args).unwrap();
        assert_eq!(ctx.db.listed_todo(1).unwrap().unwrap().action, "wash windows");
    }
}
