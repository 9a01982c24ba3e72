//! Predicate tree.
//!
//! A closed set of leaf and composite predicates over song metadata. Trees are built by the
//! parser, optionally rewritten by the optimizer, and then only read.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    audio_format::AudioFormat,
    eval,
    song::Song,
    string_filter::StringFilter,
    tag::TagType,
    timestamp::format_timestamp,
};

/// A node of a song filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Some value of the given tag matches.
    Tag(TagType, StringFilter),

    /// Some value of any tag matches.
    AnyTag(StringFilter),

    /// The song location matches.
    Uri(StringFilter),

    /// The song lies in this directory or below (or is this exact path).
    Base(String),

    /// The file was modified at or after this time.
    ModifiedSince(DateTime<Utc>),

    /// The song was added to the library at or after this time.
    AddedSince(DateTime<Utc>),

    /// The song has this audio format.
    AudioFormat {
        /// Format to compare against.
        format: AudioFormat,
        /// Compare only the fields set in `format`.
        mask: bool,
    },

    /// The song priority is at least this value.
    Priority(u8),

    /// Conjunction: all children must match. Order is preserved.
    And(Vec<Self>),

    /// Negation: the child must not match.
    Not(Box<Self>),
}

impl Predicate {
    /// Creates a negation.
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Evaluates this predicate against a song.
    pub fn matches<S: Song + ?Sized>(&self, song: &S) -> bool {
        eval::matches(self, song)
    }

    /// Formats the predicate as a filter expression that parses back to an equivalent tree.
    ///
    /// An empty conjunction formats as the empty string.
    pub fn to_expression(&self) -> String {
        match self {
            Self::Tag(tag, filter) => string_expression(tag.name(), filter),
            Self::AnyTag(filter) => string_expression("any", filter),
            Self::Uri(filter) => string_expression("file", filter),
            Self::Base(path) => format!("(base {})", quote(path)),
            Self::ModifiedSince(time) => {
                format!("(modified-since {})", quote(&format_timestamp(*time)))
            }
            Self::AddedSince(time) => format!("(added-since {})", quote(&format_timestamp(*time))),
            Self::AudioFormat { format, mask } => {
                let operator = if *mask { "=~" } else { "==" };
                format!("(AudioFormat {operator} {})", quote(&format.to_string()))
            }
            Self::Priority(priority) => format!("(prio >= {priority})"),
            Self::Not(inner) => format!("(!{})", inner.to_expression()),
            Self::And(items) => and_expression(items),
        }
    }

    /// Formats the predicate as a tree structure with the given indentation level.
    pub fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Tag(tag, filter) => writeln!(
                f,
                "{prefix}Tag({tag} {} {:?})",
                filter.operator(),
                filter.value()
            ),
            Self::AnyTag(filter) => {
                writeln!(f, "{prefix}AnyTag({} {:?})", filter.operator(), filter.value())
            }
            Self::Uri(filter) => {
                writeln!(f, "{prefix}Uri({} {:?})", filter.operator(), filter.value())
            }
            Self::Base(path) => writeln!(f, "{prefix}Base({path:?})"),
            Self::ModifiedSince(time) => {
                writeln!(f, "{prefix}ModifiedSince({})", format_timestamp(*time))
            }
            Self::AddedSince(time) => writeln!(f, "{prefix}AddedSince({})", format_timestamp(*time)),
            Self::AudioFormat { format, mask } => {
                let operator = if *mask { "=~" } else { "==" };
                writeln!(f, "{prefix}AudioFormat({operator} {format})")
            }
            Self::Priority(priority) => writeln!(f, "{prefix}Priority(>= {priority})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(items) => {
                writeln!(f, "{prefix}And")?;
                for item in items {
                    item.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Formats a conjunction: nothing for no items, the item itself for one.
pub fn and_expression(items: &[Predicate]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_expression(),
        _ => {
            let parts: Vec<String> = items.iter().map(Predicate::to_expression).collect();
            format!("({})", parts.join(" AND "))
        }
    }
}

/// Formats a string comparison leaf.
fn string_expression(name: &str, filter: &StringFilter) -> String {
    format!("({name} {} {})", filter.operator(), quote(&filter.operand()))
}

/// Double-quotes a value, escaping quotes and backslashes.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
