//! String comparison operands.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::error::ErrorKind;

/// Where in the compared text the value must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Substring match.
    Anywhere,
    /// The text must start with the value.
    Prefix,
    /// The text must equal the value.
    Full,
}

/// A string comparison rule: value, case folding, position, negation and optional regex.
///
/// Built once at parse time and immutable afterwards. Cloning copies the value and shares
/// the compiled regex.
#[derive(Debug, Clone)]
pub struct StringFilter {
    /// The value (or regex pattern) as written.
    value: String,
    /// Lowercase copy of `value` used when `fold_case` is set.
    folded: String,
    /// Compare case-insensitively.
    fold_case: bool,
    /// Where the value must occur.
    position: Position,
    /// Invert the result.
    negated: bool,
    /// Anchored regex; when present, `position` is [`Position::Full`].
    regex: Option<Arc<Regex>>,
}

impl StringFilter {
    /// Creates a plain textual filter.
    pub fn new(value: impl Into<String>, fold_case: bool, position: Position, negated: bool) -> Self {
        let value = value.into();
        let folded = if fold_case {
            value.to_lowercase()
        } else {
            String::new()
        };
        Self {
            value,
            folded,
            fold_case,
            position,
            negated,
            regex: None,
        }
    }

    /// Creates a filter that must match the whole text against the regex `pattern`.
    pub fn regex(
        pattern: impl Into<String>,
        fold_case: bool,
        negated: bool,
    ) -> Result<Self, ErrorKind> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&format!(r"\A(?:{pattern})\z"))
            .case_insensitive(fold_case)
            .build()
            .map_err(|err| ErrorKind::InvalidRegex {
                pattern: pattern.clone(),
                message: err.to_string(),
            })?;

        Ok(Self {
            regex: Some(Arc::new(regex)),
            ..Self::new(pattern, fold_case, Position::Full, negated)
        })
    }

    /// The value or regex pattern as written.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether comparisons ignore case.
    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    /// Where the value must occur.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the result is inverted.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether this filter uses a regular expression.
    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    /// Returns the same filter with negation inverted.
    pub fn negate(self) -> Self {
        Self {
            negated: !self.negated,
            ..self
        }
    }

    /// Matches `text` against this filter.
    pub fn matches(&self, text: &str) -> bool {
        self.matches_without_negation(text) != self.negated
    }

    /// Matches `text`, ignoring the negation flag.
    fn matches_without_negation(&self, text: &str) -> bool {
        if let Some(regex) = &self.regex {
            return regex.is_match(text);
        }

        if self.fold_case {
            self.compare(&text.to_lowercase(), &self.folded)
        } else {
            self.compare(text, &self.value)
        }
    }

    /// Compares already case-normalized strings according to `position`.
    fn compare(&self, text: &str, value: &str) -> bool {
        match self.position {
            Position::Anywhere => text.contains(value),
            Position::Prefix => text.starts_with(value),
            Position::Full => text == value,
        }
    }

    /// The operator token that reproduces this filter regardless of the parser's default
    /// case folding.
    pub fn operator(&self) -> &'static str {
        if self.is_regex() {
            return if self.negated { "!~" } else { "=~" };
        }

        match (self.position, self.fold_case, self.negated) {
            (Position::Anywhere, false, false) => "contains_cs",
            (Position::Anywhere, false, true) => "!contains_cs",
            (Position::Anywhere, true, false) => "contains_ci",
            (Position::Anywhere, true, true) => "!contains_ci",
            (Position::Prefix, false, false) => "starts_with_cs",
            (Position::Prefix, false, true) => "!starts_with_cs",
            (Position::Prefix, true, false) => "starts_with_ci",
            (Position::Prefix, true, true) => "!starts_with_ci",
            (Position::Full, false, false) => "eq_cs",
            (Position::Full, false, true) => "!eq_cs",
            (Position::Full, true, false) => "eq_ci",
            (Position::Full, true, true) => "!eq_ci",
        }
    }

    /// The operand text that reproduces this filter.
    ///
    /// Regex operators take their case sensitivity from the parser's default, so the
    /// pattern is pinned with an inline `(?i)` or `(?-i)` flag unless it already starts
    /// with one.
    pub fn operand(&self) -> String {
        if !self.is_regex() || has_case_flag(&self.value) {
            return self.value.clone();
        }

        let flag = if self.fold_case { "(?i)" } else { "(?-i)" };
        format!("{flag}{}", self.value)
    }
}

/// Whether a regex pattern starts with an explicit case-sensitivity flag.
fn has_case_flag(pattern: &str) -> bool {
    pattern.starts_with("(?i)") || pattern.starts_with("(?-i)")
}

impl PartialEq for StringFilter {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.fold_case == other.fold_case
            && self.position == other.position
            && self.negated == other.negated
            && self.is_regex() == other.is_regex()
    }
}
