//! Ready-made argument configurations shared by the command schemas.
//!
//! Each preset returns a fully configured [`Argument`]; callers chain
//! the builder methods to override arity or positionality where a
//! command's grammar differs from the common case.

use crate::parser::argument::{Argument, Nargs};
use crate::parser::formats::{Apply, DateFormat, IndexFormat, ProjectFormat};
use crate::parser::matchers::{
    AlwaysMatcher, FlagMatcher, FolderMatcher, PrefixMatcher, ProjectMatcher, RegexMatcher,
};
use crate::parser::ArgValue;

/// Optional-offset date tag: the keyword family plus `+N`/`-N` and a
/// unit abbreviating days/weeks/months/years, e.g. `due`, `d+3w`.
fn date_tag(name: &str, keywords: &str) -> Argument {
    let body = format!(r"(?:{keywords})(?:(?P<offset>[+-]\d+)(?P<interval>[a-z]+))?");
    Argument::new(name, RegexMatcher::new(&[&body]))
        .format(DateFormat)
        .nargs(Nargs::optional())
        .positional(false)
}

/// `due`, abbreviated down to `d`.
pub fn due_date(name: &str) -> Argument {
    date_tag(name, "due|du|d")
}

/// `remind`, abbreviated down to `r`.
pub fn remind_date(name: &str) -> Argument {
    date_tag(name, "remind|remin|remi|rem|re|r")
}

/// Free text that absorbs whatever is left, joined into one string.
pub fn joined_text(name: &str) -> Argument {
    Argument::new(name, AlwaysMatcher)
        .nargs(Nargs::at_least_one())
        .format(Apply(|words| ArgValue::Text(words.join(" "))))
}

/// Remaining tokens kept as a list (search keywords, folder names).
pub fn catch_all(name: &str) -> Argument {
    Argument::new(name, AlwaysMatcher).nargs(Nargs::any())
}

/// A required keyword chosen by unique abbreviation.
pub fn switch<S: AsRef<str>>(name: &str, options: &[S]) -> Argument {
    Argument::new(name, PrefixMatcher::new(options))
        .format(Apply(first_text))
        .nargs(Nargs::exactly(1))
}

/// Same, but absence is fine.
pub fn optional_switch<S: AsRef<str>>(name: &str, options: &[S]) -> Argument {
    switch(name, options).nargs(Nargs::optional())
}

/// A listing position: non-negative integers only, so `-3` never
/// matches and falls through to the leftover-token check.
pub fn index(name: &str) -> Argument {
    Argument::new(name, RegexMatcher::new(&[r"\d+"])).format(IndexFormat)
}

/// A `prefix/` folder reference resolved against the known folders.
pub fn folder<S: AsRef<str>>(name: &str, folders: &[S]) -> Argument {
    Argument::new(name, FolderMatcher::new(folders))
        .format(Apply(first_text))
        .nargs(Nargs::optional())
}

/// A bracketed `[folder/keywords]` parent reference, scanned from
/// anywhere in the remaining tokens.
pub fn project(name: &str) -> Argument {
    Argument::new(name, ProjectMatcher)
        .format(ProjectFormat)
        .nargs(Nargs::optional())
        .positional(false)
}

/// A saved-search name: one token starting with a dot.
pub fn search_file(name: &str) -> Argument {
    Argument::new(name, RegexMatcher::new(&[r"\.(?P<name>\S+)"]))
        .format(Apply(strip_dot))
        .nargs(Nargs::optional())
        .positional(false)
}

/// The `-c/--config` override flag, picked up from anywhere on the
/// command line.
pub fn config_flag(name: &str) -> Argument {
    Argument::new(name, FlagMatcher::new(&["-c", "--config"]))
        .format(Apply(first_text))
        .nargs(Nargs::optional())
        .positional(false)
}

fn first_text(mut values: Vec<String>) -> ArgValue {
    match values.is_empty() {
        true => ArgValue::None,
        false => ArgValue::Text(values.remove(0)),
    }
}

fn strip_dot(mut values: Vec<String>) -> ArgValue {
    match values.is_empty() {
        true => ArgValue::None,
        false => ArgValue::Text(values.remove(0).trim_start_matches('.').to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{tokens, ArgValue, Parser};

    #[test]
    fn index_rejects_negative_numbers() {
        let parser = Parser::new().argument(index("index"));
        let parsed = parser.parse(&tokens("5")).unwrap();
        assert_eq!(parsed.index("index"), Some(5));
        assert!(parser.parse(&tokens("-3")).is_err());
    }

    #[test]
    fn switch_expands_abbreviations() {
        let parser = Parser::new().argument(switch("sub", &["new", "rename", "delete", "list"]));
        let parsed = parser.parse(&tokens("ren")).unwrap();
        assert_eq!(parsed.text("sub"), Some("rename"));
    }

    #[test]
    fn search_file_strips_the_leading_dot() {
        let parser = Parser::new()
            .argument(search_file("file"))
            .argument(catch_all("rest"));
        let parsed = parser.parse(&tokens("groceries .shopping")).unwrap();
        assert_eq!(parsed.text("file"), Some("shopping"));
        assert_eq!(parsed.list("rest"), ["groceries"]);
    }

    #[test]
    fn config_flag_is_found_anywhere() {
        let parser = Parser::new()
            .argument(config_flag("config"))
            .argument(catch_all("rest"));
        let parsed = parser.parse(&tokens("list -c custom.toml today")).unwrap();
        assert_eq!(parsed.text("config"), Some("custom.toml"));
        assert_eq!(parsed.list("rest"), ["list", "today"]);
    }

    #[test]
    fn folder_preset_returns_the_canonical_name() {
        let parser = Parser::new()
            .argument(folder("folder", &["inbox", "today"]))
            .argument(catch_all("rest"));
        let parsed = parser.parse(&tokens("tod/ x")).unwrap();
        assert_eq!(parsed.text("folder"), Some("today"));
        assert_eq!(parsed.list("rest"), ["x"]);
    }

    #[test]
    fn absent_optional_presets_report_their_empty_shapes() {
        let parser = Parser::new()
            .argument(due_date("due"))
            .argument(project("parent"));
        let parsed = parser.parse(&[]).unwrap();
        assert_eq!(parsed.get("due"), Some(&ArgValue::None));
        assert_eq!(parsed.get("parent"), Some(&ArgValue::List(vec![])));
    }
}
