//! Command-line entry point: the command registry and dispatcher.
//!
//! The top level is parsed with the same engine the subcommands use: a
//! scanning `-c/--config` flag, the command keyword (chosen by unique
//! abbreviation, so `ado l` lists), and a catch-all that carries the
//! rest of the tokens into the subcommand's own parser. A subcommand
//! parse failure is never fatal: it prints the message and the
//! command's usage line and reports a non-zero exit.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::commands::{self, CommandContext};
use crate::config::Config;
use crate::db::Database;
use crate::parser::{presets, ParsedArgs, Parser};

pub struct CommandSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    build: fn(&CommandContext) -> Parser,
    run: fn(&mut CommandContext, &ParsedArgs) -> Result<()>,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "new",
        summary: "create a todo",
        usage: "new [folder/] <text...> [due+2w] [remind+3d] [[project]]",
        build: commands::new::schema,
        run: commands::new::run,
    },
    CommandSpec {
        name: "list",
        summary: "list todos, optionally filtered",
        usage: "list [.name] [folder/] [keywords...] [due] [remind] [[project]]",
        build: commands::list::schema,
        run: commands::list::run,
    },
    CommandSpec {
        name: "move",
        summary: "move a listed todo to a folder or under a project",
        usage: "move <index> folder/ | move <index> [project]",
        build: commands::mv::schema,
        run: commands::mv::run,
    },
    CommandSpec {
        name: "done",
        summary: "mark a listed todo as done",
        usage: "done <index>",
        build: commands::done::schema,
        run: commands::done::run,
    },
    CommandSpec {
        name: "folder",
        summary: "manage folders",
        usage: "folder new|rename|delete|list [names...]",
        build: commands::folder::schema,
        run: commands::folder::run,
    },
    CommandSpec {
        name: "setup",
        summary: "initialize the database",
        usage: "setup init",
        build: commands::setup::schema,
        run: commands::setup::run,
    },
    CommandSpec {
        name: "help",
        summary: "show help for a command",
        usage: "help [command]",
        build: commands::help::schema,
        run: commands::help::run,
    },
    CommandSpec {
        name: "version",
        summary: "print the version",
        usage: "version",
        build: commands::version::schema,
        run: commands::version::run,
    },
];

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|spec| spec.name).collect()
}

fn top_level_parser() -> Parser {
    Parser::new()
        .argument(presets::config_flag("config"))
        .argument(presets::optional_switch("command", &command_names()))
        .argument(presets::catch_all("args"))
}

/// Parse and run a full command line.
pub fn run(argv: &[String]) -> Result<ExitCode> {
    let parsed = match top_level_parser().parse(argv) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(command) = parsed.text("command") else {
        return match parsed.list("args").first() {
            Some(unknown) => {
                eprintln!("unknown command '{unknown}'");
                print_usage();
                Ok(ExitCode::FAILURE)
            }
            None => {
                print_usage();
                Ok(ExitCode::SUCCESS)
            }
        };
    };

    let config = Config::load(parsed.text("config").map(Path::new))?;
    config.validate()?;
    let db = Database::open(&config.database_path()?)?;
    let mut ctx = CommandContext {
        db,
        config,
        raw_args: parsed.list("args").to_vec(),
    };
    match execute(&mut ctx, command)? {
        true => Ok(ExitCode::SUCCESS),
        false => Ok(ExitCode::FAILURE),
    }
}

/// Run one subcommand against an existing context. Parse failures are
/// reported with the command's usage line instead of propagating;
/// `Ok(false)` means the command line did not parse.
pub fn execute(ctx: &mut CommandContext, command: &str) -> Result<bool> {
    let spec = COMMANDS
        .iter()
        .find(|spec| spec.name == command)
        .with_context(|| format!("unknown command '{command}'"))?;

    let parser = (spec.build)(ctx);
    let parsed = parser.parse(&ctx.raw_args);
    match parsed {
        Ok(args) => {
            (spec.run)(ctx, &args)?;
            Ok(true)
        }
        Err(e) => {
            eprintln!("ado {command}: {e}");
            eprintln!("usage: ado {}", spec.usage);
            Ok(false)
        }
    }
}

pub fn print_usage() {
    println!("usage: ado [-c <config>] <command> [<args>]");
    println!();
    println!("commands:");
    for spec in COMMANDS {
        println!("  {:<10} {}", spec.name, spec.summary);
    }
    println!();
    println!("Run 'ado help <command>' for details.");
}

pub fn print_command_help(name: &str) {
    if let Some(spec) = COMMANDS.iter().find(|spec| spec.name == name) {
        println!("ado {}: {}", spec.name, spec.summary);
        println!("usage: ado {}", spec.usage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokens;

    #[test]
    fn command_keywords_expand_from_unique_abbreviations() {
        let parsed = top_level_parser().parse(&tokens("l today/")).unwrap();
        assert_eq!(parsed.text("command"), Some("list"));
        assert_eq!(parsed.list("args"), ["today/"]);
    }

    #[test]
    fn the_config_flag_is_picked_up_anywhere() {
        let parsed = top_level_parser().parse(&tokens("new -c custom.toml Buy milk")).unwrap();
        assert_eq!(parsed.text("config"), Some("custom.toml"));
        assert_eq!(parsed.text("command"), Some("new"));
        assert_eq!(parsed.list("args"), ["Buy", "milk"]);
    }

    #[test]
    fn unknown_commands_fall_through_to_the_catch_all() {
        let parsed = top_level_parser().parse(&tokens("frobnicate x")).unwrap();
        assert_eq!(parsed.text("command"), None);
        assert_eq!(parsed.list("args"), ["frobnicate", "x"]);
    }

    #[test]
    fn every_command_has_a_registry_entry() {
        for name in ["new", "list", "move", "done", "folder", "setup", "help", "version"] {
            assert!(COMMANDS.iter().any(|spec| spec.name == name), "missing {name}");
        }
    }
}
