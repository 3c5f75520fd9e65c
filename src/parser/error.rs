//! Parse failure conditions for the argument engine.
//!
//! A matcher that simply fails to match is not an error (it returns
//! `Ok(None)` and the caller keeps scanning); the variants here are the
//! conditions that abort parsing of the whole command line.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A folder reference like `wrk/` matched none of the known folders.
    #[error("No match found for folder {0}/")]
    FolderNotFound(String),

    /// A folder reference prefix matched more than one known folder.
    #[error("Multiple matches found for folder {0}/")]
    FolderAmbiguous(String),

    /// A required argument matched fewer times than its arity demands.
    #[error("missing required argument '{0}'")]
    TooFewMatches(String),

    /// Tokens were left over after every argument had its turn.
    #[error("could not make sense of: {0}")]
    ExtraTokens(String),

    /// A matched value could not be converted to its final form.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
