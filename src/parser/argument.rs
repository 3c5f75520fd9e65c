//! One named argument: a matcher, a format, an arity, and a search mode.

use crate::parser::error::ParseError;
use crate::parser::formats::{Format, Passthrough};
use crate::parser::matchers::Matcher;
use crate::parser::{ArgValue, MatchValue};

/// Arity bounds for an argument, modeled on shell-style nargs:
/// an exact count, `?` (at most one), `*` (any number), `+` (at least
/// one). `max` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nargs {
    min: usize,
    max: Option<usize>,
}

impl Nargs {
    pub const fn exactly(n: usize) -> Self {
        Nargs { min: n, max: Some(n) }
    }

    /// `?`: zero or one.
    pub const fn optional() -> Self {
        Nargs { min: 0, max: Some(1) }
    }

    /// `*`: zero or more.
    pub const fn any() -> Self {
        Nargs { min: 0, max: None }
    }

    /// `+`: one or more.
    pub const fn at_least_one() -> Self {
        Nargs { min: 1, max: None }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    fn wants_more(&self, have: usize) -> bool {
        match self.max {
            Some(max) => have < max,
            None => true,
        }
    }
}

/// A named parameter of a command grammar.
///
/// `positional` selects the search mode: a positional argument must
/// find its matches contiguously at the head of the token list and
/// stops at the first miss; a non-positional one scans the whole list,
/// skipping tokens that do not match and leaving them for later
/// arguments. Arguments hold no per-parse state, so a schema can be
/// parsed against any number of token lists.
pub struct Argument {
    name: String,
    matcher: Box<dyn Matcher>,
    format: Box<dyn Format>,
    nargs: Nargs,
    positional: bool,
    default: Option<ArgValue>,
}

impl Argument {
    /// A positional, exactly-once argument with passthrough formatting;
    /// builder methods adjust the rest.
    pub fn new(name: &str, matcher: impl Matcher + 'static) -> Self {
        Argument {
            name: name.to_string(),
            matcher: Box::new(matcher),
            format: Box::new(Passthrough),
            nargs: Nargs::exactly(1),
            positional: true,
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nargs(mut self, nargs: Nargs) -> Self {
        self.nargs = nargs;
        self
    }

    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    pub fn format(mut self, format: impl Format + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    /// Value to report when the argument matches zero times. Without a
    /// default, zero matches format the empty match list instead.
    pub fn default_value(mut self, value: ArgValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Drive the matcher over `tokens` until the arity is exhausted or
    /// the search mode calls a halt. Returns the formatted value and
    /// the tokens this argument did not consume, in their original
    /// relative order.
    pub fn parse(&self, tokens: Vec<String>) -> Result<(ArgValue, Vec<String>), ParseError> {
        let mut matched: Vec<MatchValue> = Vec::new();
        let mut unmatched: Vec<String> = Vec::new();
        let mut tokens = tokens;

        while !tokens.is_empty() && self.nargs.wants_more(matched.len()) {
            match self.matcher.match_head(&tokens)? {
                Some((value, rest)) => {
                    matched.push(value);
                    tokens = rest;
                }
                None if self.positional => break,
                None => {
                    // Scanning mode: set the head aside and keep looking.
                    unmatched.push(tokens.remove(0));
                }
            }
        }
        unmatched.extend(tokens);

        if matched.len() < self.nargs.min() {
            return Err(ParseError::TooFewMatches(self.name.clone()));
        }
        if matched.is_empty() {
            if let Some(default) = &self.default {
                return Ok((default.clone(), unmatched));
            }
        }
        Ok((self.format.format(&matched)?, unmatched))
    }
}
