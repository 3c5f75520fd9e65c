//! Token matching strategies.
//!
//! A matcher inspects the head of the remaining token list and decides
//! whether it satisfies a pattern. `Ok(None)` means "no match" and
//! leaves the tokens for the next candidate; `Ok(Some(..))` carries the
//! matched value and a fresh remainder. Only folder references can fail
//! hard: an unknown or ambiguous folder prefix aborts the whole parse
//! so the user gets a precise diagnostic instead of a generic usage
//! message.
//!
//! Matchers never mutate the input slice.

use regex::Regex;

use crate::parser::error::ParseError;
use crate::parser::{CaptureSet, MatchValue};

pub type Matched = Option<(MatchValue, Vec<String>)>;

pub trait Matcher {
    /// Test the head of `tokens` against this matcher's pattern.
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError>;
}

/// Matches any token unconditionally. Used for free-text catch-alls.
pub struct AlwaysMatcher;

impl Matcher for AlwaysMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        Ok(Some((MatchValue::Text(head.clone()), tokens[1..].to_vec())))
    }
}

/// Case-insensitive exact equality against a fixed keyword list.
/// Returns the canonical spelling of the matched keyword.
pub struct EqualityMatcher {
    options: Vec<String>,
}

impl EqualityMatcher {
    pub fn new(options: &[&str]) -> Self {
        EqualityMatcher {
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Matcher for EqualityMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        let found = self
            .options
            .iter()
            .find(|opt| opt.to_lowercase() == head.to_lowercase());
        match found {
            Some(opt) => Ok(Some((MatchValue::Text(opt.clone()), tokens[1..].to_vec()))),
            None => Ok(None),
        }
    }
}

/// Case-insensitive prefix match against a keyword list; the token must
/// abbreviate exactly one keyword. Zero or several candidates are both
/// a soft no-match so callers can fall through gracefully.
pub struct PrefixMatcher {
    options: Vec<String>,
}

impl PrefixMatcher {
    pub fn new<S: AsRef<str>>(options: &[S]) -> Self {
        PrefixMatcher {
            options: options.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl Matcher for PrefixMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        match unique_prefix_match(&self.options, head) {
            Some(opt) => Ok(Some((MatchValue::Text(opt.to_string()), tokens[1..].to_vec()))),
            None => Ok(None),
        }
    }
}

/// A `prefix/` folder reference. The text before the slash abbreviates
/// a folder name; anything after the slash is pushed back as a new head
/// token. Unlike [`PrefixMatcher`], an unknown or ambiguous prefix is a
/// hard error, never a silent no-match.
pub struct FolderMatcher {
    folders: Vec<String>,
}

impl FolderMatcher {
    pub fn new<S: AsRef<str>>(folders: &[S]) -> Self {
        FolderMatcher {
            folders: folders.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl Matcher for FolderMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        let Some((prefix, trailing)) = head.split_once('/') else {
            return Ok(None);
        };
        // A slash inside a bracketed reference is not a folder reference.
        if prefix.contains('[') {
            return Ok(None);
        }
        let lowered = prefix.to_lowercase();
        let mut candidates = self.folders.iter().filter(|f| f.to_lowercase().starts_with(&lowered));
        let folder = match (candidates.next(), candidates.next()) {
            (Some(folder), None) => folder,
            (None, _) => return Err(ParseError::FolderNotFound(prefix.to_string())),
            (Some(_), Some(_)) => return Err(ParseError::FolderAmbiguous(prefix.to_string())),
        };
        let mut remaining = Vec::with_capacity(tokens.len());
        let trailing = trailing.trim_start();
        if !trailing.is_empty() {
            remaining.push(trailing.to_string());
        }
        remaining.extend_from_slice(&tokens[1..]);
        Ok(Some((MatchValue::Text(folder.clone()), remaining)))
    }
}

/// A flag with a value, e.g. `-c path` or `--config path`. The flag
/// spelling is prefix-matched; a bare `-` or `--` never matches. Both
/// the flag and the following value token are consumed, and the value
/// is what gets returned.
pub struct FlagMatcher {
    spellings: Vec<String>,
}

impl FlagMatcher {
    pub fn new(spellings: &[&str]) -> Self {
        FlagMatcher {
            spellings: spellings.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Matcher for FlagMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        if head == "-" || head == "--" {
            return Ok(None);
        }
        if unique_prefix_match(&self.spellings, head).is_none() {
            return Ok(None);
        }
        // The flag needs a value token to consume.
        let Some(value) = tokens.get(1) else {
            return Ok(None);
        };
        Ok(Some((MatchValue::Text(value.clone()), tokens[2..].to_vec())))
    }
}

/// Full-token match against a family of regexes. The capture groups of
/// the first regex that matches are preserved for the formatter.
pub struct RegexMatcher {
    patterns: Vec<Regex>,
}

impl RegexMatcher {
    /// Compile a family of patterns. Patterns are anchored and made
    /// case-insensitive here, so callers pass the bare body.
    pub fn new(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i)^(?:{p})$")).expect("preset pattern must compile"))
            .collect();
        RegexMatcher { patterns }
    }
}

impl Matcher for RegexMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        for re in &self.patterns {
            if let Some(caps) = re.captures(head) {
                let value = MatchValue::Captures(CaptureSet::from_captures(re, &caps));
                return Ok(Some((value, tokens[1..].to_vec())));
            }
        }
        Ok(None)
    }
}

/// A bracketed `[...]` reference. The opening bracket must appear in
/// the head token; the contents may run across several tokens until a
/// closing bracket. Text before `[` and after `]` is spliced back into
/// a single remaining token so the surrounding phrase survives intact.
pub struct ProjectMatcher;

impl Matcher for ProjectMatcher {
    fn match_head(&self, tokens: &[String]) -> Result<Matched, ParseError> {
        let Some(head) = tokens.first() else {
            return Ok(None);
        };
        let Some(open) = head.find('[') else {
            return Ok(None);
        };
        let before = &head[..open];
        let inner_start = &head[open + 1..];

        let mut contents: Vec<&str> = Vec::new();
        let (after, consumed) = if let Some(close) = inner_start.find(']') {
            contents.push(&inner_start[..close]);
            (&inner_start[close + 1..], 1)
        } else {
            contents.push(inner_start);
            let mut found = None;
            for (i, token) in tokens[1..].iter().enumerate() {
                if let Some(close) = token.find(']') {
                    contents.push(&token[..close]);
                    found = Some((&token[close + 1..], i + 2));
                    break;
                }
                contents.push(token);
            }
            match found {
                Some(end) => end,
                // No closing bracket anywhere: not a reference at all.
                None => return Ok(None),
            }
        };

        let value = contents
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let mut remaining = Vec::with_capacity(tokens.len());
        let spliced = match (before.trim(), after.trim()) {
            ("", "") => None,
            (pre, "") => Some(pre.to_string()),
            ("", post) => Some(post.to_string()),
            (pre, post) => Some(format!("{pre} {post}")),
        };
        if let Some(token) = spliced {
            remaining.push(token);
        }
        remaining.extend_from_slice(&tokens[consumed..]);
        Ok(Some((MatchValue::Text(value), remaining)))
    }
}

/// The one abbreviation resolver shared by prefix-style matchers:
/// `needle` must be a case-insensitive prefix of exactly one option.
fn unique_prefix_match<'a>(options: &'a [String], needle: &str) -> Option<&'a str> {
    let lowered = needle.to_lowercase();
    let mut candidates = options.iter().filter(|opt| opt.to_lowercase().starts_with(&lowered));
    match (candidates.next(), candidates.next()) {
        (Some(opt), None) => Some(opt),
        _ => None,
    }
}
