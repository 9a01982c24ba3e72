//! Error types for filter parsing.
//!
//! Every failure carries an [`ErrorKind`] that callers can branch on. Errors raised while
//! parsing a parenthesized expression also remember the input and the byte position of the
//! offending token, so they can be rendered with a pointer to the failing column.

use std::{error::Error, fmt};

use thiserror::Error;

use crate::audio_format::AudioFormatError;

/// The specific kind of filter error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A tag name or keyword was expected but no word characters were found.
    #[error("word expected")]
    EmptyWord,

    /// A quoted value has no closing delimiter.
    #[error("closing quote not found")]
    UnterminatedQuote,

    /// A quoted value exceeds the maximum supported length.
    #[error("quoted value is too long")]
    ValueTooLong,

    /// The filter type is neither a known tag nor a special keyword.
    #[error("unknown filter type: {0}")]
    UnknownFilterType(String),

    /// The string comparison operator is not recognized.
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    /// Two sibling expressions were not joined with `AND`.
    #[error("'AND' expected")]
    ExpectedAnd,

    /// A specific operator was required.
    #[error("{0} expected")]
    ExpectedOperator(&'static str),

    /// A closing parenthesis was required.
    #[error("')' expected")]
    ExpectedCloseParen,

    /// An opening parenthesis was required.
    #[error("'(' expected")]
    ExpectedOpenParen,

    /// A quoted value was required.
    #[error("quoted string expected")]
    QuotedStringExpected,

    /// An unsigned integer was required.
    #[error("number expected")]
    NumberExpected,

    /// A priority outside of `0..=255`.
    #[error("invalid priority value: {0}")]
    InvalidPriority(u64),

    /// A `base` argument that is not a safe relative path.
    #[error("bad URI: {0:?}")]
    BadUri(String),

    /// Parenthesized expressions nested past the supported depth.
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),

    /// A complete expression was followed by more text.
    #[error("unparsed garbage after expression")]
    UnparsedGarbage,

    /// The flat argument list was empty or ended in the middle of a pair.
    #[error("incorrect number of filter arguments")]
    ArgCount,

    /// A timestamp that is neither ISO 8601 nor a Unix time.
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The rejected text.
        value: String,
        /// The ISO 8601 parse failure.
        source: chrono::ParseError,
    },

    /// An audio format specification that could not be parsed.
    #[error("invalid audio format {value:?}: {source}")]
    InvalidAudioFormat {
        /// The rejected text.
        value: String,
        /// What was wrong with it.
        source: AudioFormatError,
    },

    /// A regular expression that failed to compile.
    #[error("invalid regular expression {pattern:?}: {message}")]
    InvalidRegex {
        /// The rejected pattern.
        pattern: String,
        /// The compiler's diagnostic.
        message: String,
    },
}

/// A filter parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Byte position in `input` where the error occurred (if known).
    pub position: Option<usize>,
    /// The expression being parsed (if any).
    pub input: Option<String>,
}

impl FilterError {
    /// Creates an error without position information.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            position: None,
            input: None,
        }
    }

    /// Creates an error at a byte position within `input`.
    pub fn at(kind: ErrorKind, position: usize, input: &str) -> Self {
        Self {
            kind,
            position: Some(position),
            input: Some(input.to_string()),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            ErrorKind::UnterminatedQuote => Some("Add the closing quote; escape quotes inside values with '\\'"),
            ErrorKind::ExpectedAnd => {
                Some("Join sibling expressions with AND, e.g. '((artist == \"A\") AND (album == \"B\"))'")
            }
            ErrorKind::UnknownOperator(_) => Some(
                "Valid operators are ==, !=, contains, starts_with, eq_cs, eq_ci, contains_cs, \
                 contains_ci, starts_with_cs, starts_with_ci, =~, !~",
            ),
            ErrorKind::ArgCount => Some("Pass either a '(...)' expression or TAG VALUE pairs"),
            _ => None,
        }
    }
}

impl From<ErrorKind> for FilterError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let (Some(input), Some(position)) = (&self.input, self.position) {
            let mut clamped = position.min(input.len());
            while !input.is_char_boundary(clamped) {
                clamped -= 1;
            }
            let column = input[..clamped].chars().count();
            write!(f, "\n  {input}\n  {}^", " ".repeat(column))?;
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "\nhint: {suggestion}")?;
        }

        Ok(())
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}
