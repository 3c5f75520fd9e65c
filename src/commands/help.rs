//! `ado help [command]`

use anyhow::Result;

use crate::cli;
use crate::commands::CommandContext;
use crate::parser::{presets, ParsedArgs, Parser};

pub fn schema(_ctx: &CommandContext) -> Parser {
    Parser::new().argument(presets::optional_switch("command", &cli::command_names()))
}

pub fn run(_ctx: &mut CommandContext, args: &ParsedArgs) -> Result<()> {
    match args.text("command") {
        Some(name) => cli::print_command_help(name),
        None => cli::print_usage(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use crate::parser::tokens;

    #[test]
    fn an_abbreviated_command_name_is_accepted() {
        let ctx = test_context();
        let args = schema(&ctx).parse(&tokens("mo")).unwrap();
        assert_eq!(args.text("command"), Some("move"));
    }

    #[test]
    fn an_unknown_command_name_fails_to_parse() {
        let ctx = test_context();
        assert!(schema(&ctx).parse(&tokens("frobnicate")).is_err());
    }
}
