//! Lexical primitives for filter expressions.
//!
//! The expression grammar is context sensitive: priority values are bare digits, operator
//! tokens only make sense after a tag name, and `AND` is only a keyword between two
//! sub-expressions. Instead of producing a token stream up front, the parser drives a
//! [`Lexer`] cursor and asks for the primitive it expects next.

use crate::error::{ErrorKind, FilterError};

/// Maximum length in bytes of an unescaped quoted value.
pub const MAX_QUOTED_LEN: usize = 4096;

/// Cursor over an expression string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Creates an error at a specific position.
    pub fn error_at(&self, kind: ErrorKind, position: usize) -> FilterError {
        FilterError::at(kind, position, self.input)
    }

    /// Creates an error at the current position.
    pub fn error(&self, kind: ErrorKind) -> FilterError {
        self.error_at(kind, self.position)
    }

    /// Current byte position in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Whether the whole input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances past spaces and tabs.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\t']);
        self.position += rest.len() - trimmed.len();
    }

    /// Consumes `ch` and any whitespace after it. Returns false if `ch` is not next.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() != Some(ch) {
            return false;
        }
        self.position += ch.len_utf8();
        self.skip_whitespace();
        true
    }

    /// Consumes `prefix` (ASCII case-insensitive) and any whitespace after it.
    pub fn eat_prefix(&mut self, prefix: &str) -> bool {
        match self.rest().get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => {
                self.position += prefix.len();
                self.skip_whitespace();
                true
            }
            _ => false,
        }
    }

    /// Consumes the longest run of tag-name characters and the whitespace after it.
    pub fn scan_word(&mut self) -> Result<&'a str, FilterError> {
        let rest = self.rest();
        let len = rest
            .find(|ch: char| !is_word_char(ch))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(ErrorKind::EmptyWord));
        }

        self.position += len;
        self.skip_whitespace();
        Ok(&rest[..len])
    }

    /// Consumes a run of ASCII digits and the whitespace after it.
    ///
    /// Returns an empty string (consuming nothing) when no digit is next.
    pub fn scan_digits(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        if len > 0 {
            self.position += len;
            self.skip_whitespace();
        }
        &rest[..len]
    }

    /// Consumes a single- or double-quoted value and the whitespace after it.
    ///
    /// A backslash makes the following character literal. The returned value has the
    /// delimiters and escapes removed.
    pub fn scan_quoted(&mut self) -> Result<String, FilterError> {
        let start = self.position;
        let mut chars = self.rest().char_indices();

        let quote = match chars.next() {
            Some((_, quote @ ('"' | '\''))) => quote,
            _ => return Err(self.error(ErrorKind::QuotedStringExpected)),
        };

        let mut value = String::new();
        loop {
            let Some((offset, ch)) = chars.next() else {
                return Err(self.error_at(ErrorKind::UnterminatedQuote, start));
            };

            if ch == quote {
                self.position += offset + ch.len_utf8();
                break;
            }

            let literal = if ch == '\\' {
                match chars.next() {
                    Some((_, escaped)) => escaped,
                    None => return Err(self.error_at(ErrorKind::UnterminatedQuote, start)),
                }
            } else {
                ch
            };

            value.push(literal);
            if value.len() > MAX_QUOTED_LEN {
                return Err(self.error_at(ErrorKind::ValueTooLong, start));
            }
        }

        self.skip_whitespace();
        Ok(value)
    }
}

/// Characters allowed in tag names and keywords.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '-'
}
