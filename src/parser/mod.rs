//! Declarative argument engine for ado's command line.
//!
//! Commands describe their grammar as an ordered list of [`Argument`]s,
//! each pairing a [`Matcher`](matchers::Matcher) (how tokens are
//! recognized) with a [`Format`](formats::Format) (how the raw matches
//! become a typed value). A [`Parser`] threads the shrinking token list
//! through its arguments in order and rejects anything left unconsumed.
//!
//! Matchers never mutate their input; every match returns a fresh
//! remainder, so a token vector can be handed to the engine and reused
//! afterwards.

pub mod argument;
pub mod error;
pub mod formats;
pub mod matchers;
pub mod presets;

use std::collections::HashMap;

use chrono::NaiveDate;

pub use argument::{Argument, Nargs};
pub use error::ParseError;

/// Raw value produced by a single matcher hit.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchValue {
    /// Plain matched text (possibly canonicalized, e.g. an expanded
    /// keyword abbreviation).
    Text(String),
    /// Full matched text plus named regex capture groups.
    Captures(CaptureSet),
}

impl MatchValue {
    /// The matched text regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            MatchValue::Text(t) => t,
            MatchValue::Captures(c) => &c.text,
        }
    }
}

/// Owned snapshot of a regex match, so formatters can inspect capture
/// groups long after the matcher's borrow has ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptureSet {
    pub text: String,
    groups: HashMap<String, String>,
}

impl CaptureSet {
    pub fn from_captures(re: &regex::Regex, caps: &regex::Captures) -> Self {
        let groups = re
            .capture_names()
            .flatten()
            .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
            .collect();
        CaptureSet {
            text: caps[0].to_string(),
            groups,
        }
    }

    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }
}

/// A parent ("project") reference, optionally qualified by folder:
/// `[errands/call the plumber]` -> folder `errands`, keywords
/// `["call", "the", "plumber"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectRef {
    pub folder: Option<String>,
    pub keywords: Vec<String>,
}

/// Final, typed value of one argument after formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// The argument matched nothing and has no meaningful value.
    None,
    Text(String),
    List(Vec<String>),
    Index(usize),
    Date(NaiveDate),
    Project(ProjectRef),
}

/// Result of a full parse: argument name -> formatted value.
///
/// Every argument of the parser appears here, including those that
/// matched zero times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// The argument's text, if it parsed to a `Text` value.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(t)) => Some(t),
            _ => None,
        }
    }

    /// The argument's token list; empty for anything but a `List` value.
    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ArgValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        match self.values.get(name) {
            Some(ArgValue::Index(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.values.get(name) {
            Some(ArgValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn project(&self, name: &str) -> Option<&ProjectRef> {
        match self.values.get(name) {
            Some(ArgValue::Project(p)) => Some(p),
            _ => None,
        }
    }

    fn insert(&mut self, name: &str, value: ArgValue) {
        self.values.insert(name.to_string(), value);
    }
}

/// An ordered sequence of arguments applied to one token list.
///
/// Arguments run in registration order, each consuming its matches from
/// the remainder the previous one left behind. Registration order is
/// therefore priority: scanners registered early strip their tokens out
/// before a trailing catch-all absorbs the rest.
#[derive(Default)]
pub struct Parser {
    arguments: Vec<Argument>,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn argument(mut self, arg: Argument) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Parse `tokens`, producing a value for every argument.
    ///
    /// Fails if any argument falls short of its arity or if tokens
    /// remain unconsumed after the last argument.
    pub fn parse(&self, tokens: &[String]) -> Result<ParsedArgs, ParseError> {
        let mut parsed = ParsedArgs::default();
        let mut remaining = tokens.to_vec();
        for arg in &self.arguments {
            let (value, rest) = arg.parse(remaining)?;
            parsed.insert(arg.name(), value);
            remaining = rest;
        }
        if !remaining.is_empty() {
            return Err(ParseError::ExtraTokens(remaining.join(" ")));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
pub(crate) fn tokens(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
