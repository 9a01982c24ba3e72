//! Filter expression parser.
//!
//! Parses parenthesized filter expressions into a [`Predicate`] tree using recursive
//! descent over a [`Lexer`] cursor.
//!
//! # Grammar
//!
//! ```text
//! expr     → "(" (group | negation | leaf) ")"
//! group    → expr ("AND" expr)*
//! negation → "!" expr
//! leaf     → TYPE (strop QUOTED | QUOTED | ("==" | "=~") QUOTED | ">=" DIGITS)
//! ```
//!
//! Whitespace (spaces and tabs) is skipped after every token. A group with a single
//! expression is that expression; `AND` is case sensitive.

use chrono::{DateTime, Utc};

use crate::{
    ast::Predicate,
    audio_format::AudioFormat,
    error::{ErrorKind, FilterError},
    lexer::Lexer,
    string_filter::{Position, StringFilter},
    tag::TagType,
    timestamp::parse_timestamp,
    uri::is_safe_local,
};

/// What a filter type name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterType {
    /// A metadata tag.
    Tag(TagType),
    /// Every tag.
    AnyTag,
    /// The song location.
    Uri,
    /// A directory constraint.
    Base,
    /// Modification time.
    ModifiedSince,
    /// Time added to the library.
    AddedSince,
    /// Audio format.
    AudioFormat,
    /// Queue priority.
    Priority,
}

impl FilterType {
    /// Resolves a filter type name.
    ///
    /// `base`, `modified-since` and `added-since` are case sensitive; everything else is
    /// matched ignoring ASCII case.
    fn resolve(name: &str) -> Result<Self, ErrorKind> {
        let resolved = if name.eq_ignore_ascii_case("file") || name.eq_ignore_ascii_case("filename") {
            Self::Uri
        } else if name.eq_ignore_ascii_case("any") {
            Self::AnyTag
        } else if name == "base" {
            Self::Base
        } else if name == "modified-since" {
            Self::ModifiedSince
        } else if name == "added-since" {
            Self::AddedSince
        } else if name.eq_ignore_ascii_case("AudioFormat") {
            Self::AudioFormat
        } else if name.eq_ignore_ascii_case("prio") {
            Self::Priority
        } else {
            return TagType::parse(name)
                .map(Self::Tag)
                .ok_or_else(|| ErrorKind::UnknownFilterType(name.to_string()));
        };
        Ok(resolved)
    }
}

/// A string comparison operator token.
struct Operator {
    /// The token including its mandatory trailing space.
    token: &'static str,
    /// Case folding, or `None` to use the parser's default.
    fold_case: Option<bool>,
    /// Whether the comparison is inverted.
    negated: bool,
    /// Where the value must occur.
    position: Position,
}

/// String comparison operators in matching order. The explicit `_cs`/`_ci` forms come
/// first so that `contains` does not shadow them.
const OPERATORS: [Operator; 16] = [
    op("contains_cs ", Some(false), false, Position::Anywhere),
    op("!contains_cs ", Some(false), true, Position::Anywhere),
    op("contains_ci ", Some(true), false, Position::Anywhere),
    op("!contains_ci ", Some(true), true, Position::Anywhere),
    op("starts_with_cs ", Some(false), false, Position::Prefix),
    op("!starts_with_cs ", Some(false), true, Position::Prefix),
    op("starts_with_ci ", Some(true), false, Position::Prefix),
    op("!starts_with_ci ", Some(true), true, Position::Prefix),
    op("eq_cs ", Some(false), false, Position::Full),
    op("!eq_cs ", Some(false), true, Position::Full),
    op("eq_ci ", Some(true), false, Position::Full),
    op("!eq_ci ", Some(true), true, Position::Full),
    op("contains ", None, false, Position::Anywhere),
    op("!contains ", None, true, Position::Anywhere),
    op("starts_with ", None, false, Position::Prefix),
    op("!starts_with ", None, true, Position::Prefix),
];

/// Builds an [`Operator`] table entry.
const fn op(
    token: &'static str,
    fold_case: Option<bool>,
    negated: bool,
    position: Position,
) -> Operator {
    Operator {
        token,
        fold_case,
        negated,
        position,
    }
}

/// Maximum nesting of parenthesized expressions.
pub const MAX_DEPTH: usize = 256;

/// Recursive descent parser for filter expressions.
struct Parser<'a> {
    /// Cursor over the expression.
    lexer: Lexer<'a>,
    /// Default case folding for operators without an explicit `_cs`/`_ci` suffix.
    fold_case: bool,
    /// Number of expressions currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`.
    fn new(input: &'a str, fold_case: bool) -> Self {
        Self {
            lexer: Lexer::new(input),
            fold_case,
            depth: 0,
        }
    }

    /// Parses one complete expression, rejecting trailing input.
    fn parse(mut self) -> Result<Predicate, FilterError> {
        let expr = self.parse_expression()?;

        if !self.lexer.is_at_end() {
            return Err(self.lexer.error(ErrorKind::UnparsedGarbage));
        }

        Ok(expr)
    }

    /// Parses: expr → "(" (group | negation | leaf) ")"
    fn parse_expression(&mut self) -> Result<Predicate, FilterError> {
        if !self.lexer.eat('(') {
            return Err(self.lexer.error(ErrorKind::ExpectedOpenParen));
        }
        if self.depth >= MAX_DEPTH {
            return Err(self.lexer.error(ErrorKind::NestingTooDeep(MAX_DEPTH)));
        }

        self.depth += 1;
        let expr = match self.lexer.peek() {
            Some('(') => self.parse_group(),
            Some('!') => self.parse_negation(),
            _ => self.parse_leaf(),
        };
        self.depth -= 1;
        expr
    }

    /// Parses: group → expr ("AND" expr)* ")"
    fn parse_group(&mut self) -> Result<Predicate, FilterError> {
        let first = self.parse_expression()?;
        if self.lexer.eat(')') {
            return Ok(first);
        }

        self.expect_and()?;
        let mut items = vec![first];
        loop {
            items.push(self.parse_expression()?);
            if self.lexer.eat(')') {
                return Ok(Predicate::And(items));
            }
            self.expect_and()?;
        }
    }

    /// Consumes the `AND` keyword.
    fn expect_and(&mut self) -> Result<(), FilterError> {
        let start = self.lexer.position();
        match self.lexer.scan_word() {
            Ok("AND") => Ok(()),
            _ => Err(self.lexer.error_at(ErrorKind::ExpectedAnd, start)),
        }
    }

    /// Parses: negation → "!" expr ")"
    fn parse_negation(&mut self) -> Result<Predicate, FilterError> {
        self.lexer.eat('!');
        if self.lexer.peek() != Some('(') {
            return Err(self.lexer.error(ErrorKind::ExpectedOpenParen));
        }

        let inner = self.parse_expression()?;
        self.expect_close()?;
        Ok(Predicate::not(inner))
    }

    /// Parses a leaf after its opening parenthesis, including the closing one.
    fn parse_leaf(&mut self) -> Result<Predicate, FilterError> {
        let start = self.lexer.position();
        let name = self.lexer.scan_word()?;
        let filter_type = FilterType::resolve(name).map_err(|kind| self.lexer.error_at(kind, start))?;

        let predicate = match filter_type {
            FilterType::ModifiedSince => Predicate::ModifiedSince(self.parse_timestamp()?),
            FilterType::AddedSince => Predicate::AddedSince(self.parse_timestamp()?),
            FilterType::Base => Predicate::Base(self.lexer.scan_quoted()?),
            FilterType::AudioFormat => self.parse_audio_format()?,
            FilterType::Priority => Predicate::Priority(self.parse_priority()?),
            FilterType::AnyTag => Predicate::AnyTag(self.parse_string_filter()?),
            FilterType::Uri => Predicate::Uri(self.parse_string_filter()?),
            FilterType::Tag(tag) => Predicate::Tag(tag, self.parse_string_filter()?),
        };

        self.expect_close()?;
        Ok(predicate)
    }

    /// Consumes a closing parenthesis.
    fn expect_close(&mut self) -> Result<(), FilterError> {
        if self.lexer.eat(')') {
            Ok(())
        } else {
            Err(self.lexer.error(ErrorKind::ExpectedCloseParen))
        }
    }

    /// Parses a quoted time stamp.
    fn parse_timestamp(&mut self) -> Result<DateTime<Utc>, FilterError> {
        let start = self.lexer.position();
        let value = self.lexer.scan_quoted()?;
        parse_timestamp(&value).map_err(|kind| self.lexer.error_at(kind, start))
    }

    /// Parses: ("==" | "=~") QUOTED
    fn parse_audio_format(&mut self) -> Result<Predicate, FilterError> {
        let mask = if self.lexer.eat_prefix("==") {
            false
        } else if self.lexer.eat_prefix("=~") {
            true
        } else {
            return Err(self.lexer.error(ErrorKind::ExpectedOperator("'==' or '=~'")));
        };

        let start = self.lexer.position();
        let value = self.lexer.scan_quoted()?;
        let format = AudioFormat::parse(&value, mask).map_err(|source| {
            self.lexer
                .error_at(ErrorKind::InvalidAudioFormat { value, source }, start)
        })?;
        Ok(Predicate::AudioFormat { format, mask })
    }

    /// Parses: ">=" DIGITS
    fn parse_priority(&mut self) -> Result<u8, FilterError> {
        if !self.lexer.eat_prefix(">=") {
            return Err(self.lexer.error(ErrorKind::ExpectedOperator("'>='")));
        }

        let start = self.lexer.position();
        let digits = self.lexer.scan_digits();
        priority_from_digits(digits).map_err(|kind| self.lexer.error_at(kind, start))
    }

    /// Parses a string comparison operator and its quoted operand.
    fn parse_string_filter(&mut self) -> Result<StringFilter, FilterError> {
        let start = self.lexer.position();

        for op in &OPERATORS {
            if self.lexer.eat_prefix(op.token) {
                let value = self.lexer.scan_quoted()?;
                let fold_case = op.fold_case.unwrap_or(self.fold_case);
                return Ok(StringFilter::new(value, fold_case, op.position, op.negated));
            }
        }

        #[cfg(feature = "regex-operators")]
        for (token, negated) in [("=~", false), ("!~", true)] {
            if self.lexer.eat_prefix(token) {
                let pattern_start = self.lexer.position();
                let pattern = self.lexer.scan_quoted()?;
                return StringFilter::regex(pattern, self.fold_case, negated)
                    .map_err(|kind| self.lexer.error_at(kind, pattern_start));
            }
        }

        let negated = if self.lexer.eat_prefix("==") {
            false
        } else if self.lexer.eat_prefix("!=") {
            true
        } else {
            let token = self.lexer.rest().split([' ', '\t']).next().unwrap_or_default();
            return Err(self
                .lexer
                .error_at(ErrorKind::UnknownOperator(token.to_string()), start));
        };

        let value = self.lexer.scan_quoted()?;
        Ok(StringFilter::new(value, self.fold_case, Position::Full, negated))
    }
}

/// Converts unquoted priority digits, rejecting an empty run and values above 255.
fn priority_from_digits(digits: &str) -> Result<u8, ErrorKind> {
    if digits.is_empty() {
        return Err(ErrorKind::NumberExpected);
    }
    // all digits, so the only failure is overflow
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    u8::try_from(value).map_err(|_| ErrorKind::InvalidPriority(value))
}

/// Parses one complete parenthesized filter expression.
///
/// `fold_case` is the default case folding for `==`, `!=`, `contains`, `starts_with` and
/// the regex operators. The whole input must be consumed.
pub fn parse_expression(input: &str, fold_case: bool) -> Result<Predicate, FilterError> {
    Parser::new(input, fold_case).parse()
}

/// Builds the leaf for one legacy `TAG VALUE` pair.
///
/// With `fold_case`, string comparisons widen from exact to substring matches.
pub fn parse_pair(name: &str, value: &str, fold_case: bool) -> Result<Predicate, ErrorKind> {
    let position = if fold_case {
        Position::Anywhere
    } else {
        Position::Full
    };
    let string_filter = || StringFilter::new(value, fold_case, position, false);

    let predicate = match FilterType::resolve(name)? {
        FilterType::Base => {
            if !is_safe_local(value) {
                return Err(ErrorKind::BadUri(value.to_string()));
            }
            Predicate::Base(value.to_string())
        }
        FilterType::ModifiedSince => Predicate::ModifiedSince(parse_timestamp(value)?),
        FilterType::AddedSince => Predicate::AddedSince(parse_timestamp(value)?),
        FilterType::AudioFormat => {
            let format = AudioFormat::parse(value, true).map_err(|source| {
                ErrorKind::InvalidAudioFormat {
                    value: value.to_string(),
                    source,
                }
            })?;
            Predicate::AudioFormat { format, mask: true }
        }
        FilterType::Priority => {
            let digits = if value.bytes().all(|b| b.is_ascii_digit()) {
                value
            } else {
                ""
            };
            Predicate::Priority(priority_from_digits(digits)?)
        }
        FilterType::Uri => Predicate::Uri(string_filter()),
        FilterType::AnyTag => Predicate::AnyTag(string_filter()),
        FilterType::Tag(tag) => Predicate::Tag(tag, string_filter()),
    };
    Ok(predicate)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::audio_format::SampleFormat;

    fn parse(input: &str) -> Predicate {
        parse_expression(input, false).unwrap()
    }

    fn parse_err(input: &str) -> ErrorKind {
        parse_expression(input, false).unwrap_err().kind
    }

    fn tag(tag: TagType, value: &str, fold_case: bool, position: Position, negated: bool) -> Predicate {
        Predicate::Tag(tag, StringFilter::new(value, fold_case, position, negated))
    }

    #[test]
    fn resolve_filter_types() {
        assert_eq!(FilterType::resolve("FILE"), Ok(FilterType::Uri));
        assert_eq!(FilterType::resolve("filename"), Ok(FilterType::Uri));
        assert_eq!(FilterType::resolve("Any"), Ok(FilterType::AnyTag));
        assert_eq!(FilterType::resolve("audioformat"), Ok(FilterType::AudioFormat));
        assert_eq!(FilterType::resolve("PRIO"), Ok(FilterType::Priority));
        assert_eq!(FilterType::resolve("artist"), Ok(FilterType::Tag(TagType::Artist)));
    }

    #[test]
    fn resolve_case_sensitive_keywords() {
        assert_eq!(FilterType::resolve("base"), Ok(FilterType::Base));
        assert_eq!(
            FilterType::resolve("BASE"),
            Err(ErrorKind::UnknownFilterType("BASE".into()))
        );
        assert!(FilterType::resolve("Modified-Since").is_err());
        assert_eq!(FilterType::resolve("added-since"), Ok(FilterType::AddedSince));
    }

    #[test]
    fn equality() {
        assert_eq!(
            parse(r#"(artist == "Air")"#),
            tag(TagType::Artist, "Air", false, Position::Full, false)
        );
        assert_eq!(
            parse(r#"(artist != "Air")"#),
            tag(TagType::Artist, "Air", false, Position::Full, true)
        );
    }

    #[test]
    fn generic_operators_inherit_fold_case() {
        let predicate = parse_expression(r#"(title contains "love")"#, true).unwrap();
        assert_eq!(
            predicate,
            tag(TagType::Title, "love", true, Position::Anywhere, false)
        );

        let predicate = parse_expression(r#"(title !starts_with "The")"#, false).unwrap();
        assert_eq!(
            predicate,
            tag(TagType::Title, "The", false, Position::Prefix, true)
        );
    }

    #[test]
    fn explicit_operators_ignore_fold_case() {
        let predicate = parse_expression(r#"(title contains_cs "Love")"#, true).unwrap();
        assert_eq!(
            predicate,
            tag(TagType::Title, "Love", false, Position::Anywhere, false)
        );

        let predicate = parse_expression(r#"(title !eq_ci "Love")"#, false).unwrap();
        assert_eq!(predicate, tag(TagType::Title, "Love", true, Position::Full, true));
    }

    #[test]
    fn operators_are_case_insensitive() {
        assert_eq!(
            parse(r#"(title STARTS_WITH_CI "the")"#),
            tag(TagType::Title, "the", true, Position::Prefix, false)
        );
    }

    #[test]
    fn operator_requires_space() {
        assert_eq!(
            parse_err(r#"(title contains"x")"#),
            ErrorKind::UnknownOperator("contains\"x\")".into())
        );
    }

    #[test]
    fn unknown_operator() {
        let err = parse_expression(r#"(artist ~= "Air")"#, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperator("~=".into()));
        assert_eq!(err.position, Some(8));
    }

    #[test]
    fn any_and_file() {
        assert_eq!(
            parse(r#"(any == "x")"#),
            Predicate::AnyTag(StringFilter::new("x", false, Position::Full, false))
        );
        assert_eq!(
            parse(r#"(file == "a/b.flac")"#),
            Predicate::Uri(StringFilter::new("a/b.flac", false, Position::Full, false))
        );
    }

    #[cfg(feature = "regex-operators")]
    #[test]
    fn regex_operators() {
        let Predicate::Tag(_, filter) = parse_expression(r#"(genre =~ "post-.*")"#, true).unwrap() else {
            panic!("expected tag predicate");
        };
        assert!(filter.is_regex());
        assert!(filter.fold_case());
        assert!(filter.matches("Post-Rock"));

        let Predicate::Tag(_, filter) = parse(r#"(genre !~ "rock")"#) else {
            panic!("expected tag predicate");
        };
        assert!(filter.is_negated());
        assert!(filter.matches("Rock"));
    }

    #[cfg(feature = "regex-operators")]
    #[test]
    fn invalid_regex_is_positioned() {
        let err = parse_expression(r#"(genre =~ "(")"#, false).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRegex { .. }));
        assert_eq!(err.position, Some(10));
    }

    #[test]
    fn base() {
        assert_eq!(parse(r#"(base "music/rock")"#), Predicate::Base("music/rock".into()));
    }

    #[test]
    fn timestamps() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(
            parse(r#"(modified-since "2024-05-01T00:00:00Z")"#),
            Predicate::ModifiedSince(time)
        );
        assert_eq!(
            parse(r#"(added-since "1714521600")"#),
            Predicate::AddedSince(time)
        );
        assert!(matches!(
            parse_err(r#"(modified-since "yesterday")"#),
            ErrorKind::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn audio_format() {
        assert_eq!(
            parse(r#"(AudioFormat == "44100:16:2")"#),
            Predicate::AudioFormat {
                format: AudioFormat::new(44100, SampleFormat::S16, 2),
                mask: false,
            }
        );
        assert_eq!(
            parse(r#"(AudioFormat =~ "*:24:*")"#),
            Predicate::AudioFormat {
                format: AudioFormat {
                    format: Some(SampleFormat::S24P32),
                    ..AudioFormat::default()
                },
                mask: true,
            }
        );
        assert_eq!(
            parse_err(r#"(AudioFormat != "44100:16:2")"#),
            ErrorKind::ExpectedOperator("'==' or '=~'")
        );
        assert!(matches!(
            parse_err(r#"(AudioFormat == "*:16:2")"#),
            ErrorKind::InvalidAudioFormat { .. }
        ));
    }

    #[test]
    fn priority() {
        assert_eq!(parse("(prio >= 5)"), Predicate::Priority(5));
        assert_eq!(parse("(prio >= 255)"), Predicate::Priority(255));
        assert_eq!(parse("(prio >=0)"), Predicate::Priority(0));
        assert_eq!(parse_err("(prio >= 256)"), ErrorKind::InvalidPriority(256));
        assert_eq!(
            parse_err("(prio >= 99999999999999999999999)"),
            ErrorKind::InvalidPriority(u64::MAX)
        );
        assert_eq!(parse_err("(prio >= x)"), ErrorKind::NumberExpected);
        assert_eq!(parse_err("(prio <= 5)"), ErrorKind::ExpectedOperator("'>='"));
        assert_eq!(parse_err("(prio >= 5 x)"), ErrorKind::ExpectedCloseParen);
    }

    #[test]
    fn and_group() {
        let predicate = parse(r#"((artist == "Air") AND (title contains "Love") AND (prio >= 1))"#);
        let Predicate::And(items) = predicate else {
            panic!("expected And");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], Predicate::Priority(1));
    }

    #[test]
    fn single_nested_expression() {
        assert_eq!(parse("((prio >= 1))"), Predicate::Priority(1));
    }

    #[test]
    fn and_is_required_between_siblings() {
        assert_eq!(
            parse_err(r#"((artist == "Air") (title == "x"))"#),
            ErrorKind::ExpectedAnd
        );
        assert_eq!(
            parse_err(r#"((artist == "Air") and (title == "x"))"#),
            ErrorKind::ExpectedAnd
        );
    }

    #[test]
    fn negation() {
        assert_eq!(
            parse(r#"(!(artist == "Air"))"#),
            Predicate::not(tag(TagType::Artist, "Air", false, Position::Full, false))
        );
        assert_eq!(
            parse("(! (!(prio >= 1)))"),
            Predicate::not(Predicate::not(Predicate::Priority(1)))
        );
        assert_eq!(parse_err(r#"(!artist == "Air")"#), ErrorKind::ExpectedOpenParen);
        assert_eq!(parse_err("(!(prio >= 1)"), ErrorKind::ExpectedCloseParen);
    }

    #[test]
    fn whitespace_between_tokens() {
        assert_eq!(
            parse("( \t( prio >= 1 )  AND\t(prio >= 2) ) "),
            Predicate::And(vec![Predicate::Priority(1), Predicate::Priority(2)])
        );
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse_err(r#"artist == "Air""#), ErrorKind::ExpectedOpenParen);
        assert_eq!(parse_err(r#"(artist == "Air""#), ErrorKind::ExpectedCloseParen);
        assert_eq!(parse_err(r#"(artist == Air)"#), ErrorKind::QuotedStringExpected);
        assert_eq!(parse_err(r#"(== "Air")"#), ErrorKind::EmptyWord);
        assert_eq!(
            parse_err(r#"(colour == "red")"#),
            ErrorKind::UnknownFilterType("colour".into())
        );
        assert_eq!(parse_err(r#"(artist == "Air"#), ErrorKind::UnterminatedQuote);
    }

    #[test]
    fn trailing_garbage() {
        let err = parse_expression(r#"(artist == "Air") x"#, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnparsedGarbage);
        assert_eq!(err.position, Some(18));
    }

    #[test]
    fn legacy_pairs() {
        assert_eq!(
            parse_pair("artist", "Bob", false),
            Ok(tag(TagType::Artist, "Bob", false, Position::Full, false))
        );
        assert_eq!(
            parse_pair("artist", "Bob", true),
            Ok(tag(TagType::Artist, "Bob", true, Position::Anywhere, false))
        );
        assert_eq!(
            parse_pair("file", "a.flac", true),
            Ok(Predicate::Uri(StringFilter::new("a.flac", true, Position::Anywhere, false)))
        );
    }

    #[test]
    fn legacy_base_must_be_safe() {
        assert_eq!(parse_pair("base", "a/b", false), Ok(Predicate::Base("a/b".into())));
        assert_eq!(
            parse_pair("base", "../etc", false),
            Err(ErrorKind::BadUri("../etc".into()))
        );
        assert_eq!(parse_pair("base", "", false), Err(ErrorKind::BadUri(String::new())));
    }

    #[test]
    fn legacy_special_types() {
        assert_eq!(parse_pair("prio", "7", false), Ok(Predicate::Priority(7)));
        assert_eq!(parse_pair("prio", "7x", false), Err(ErrorKind::NumberExpected));
        assert_eq!(parse_pair("prio", "300", false), Err(ErrorKind::InvalidPriority(300)));
        assert!(matches!(
            parse_pair("AudioFormat", "*:*:2", false),
            Ok(Predicate::AudioFormat { mask: true, .. })
        ));
        assert!(matches!(
            parse_pair("modified-since", "12", false),
            Ok(Predicate::ModifiedSince(_))
        ));
        assert_eq!(
            parse_pair("colour", "red", false),
            Err(ErrorKind::UnknownFilterType("colour".into()))
        );
    }

    /// Wraps `(prio >= 1)` in `levels` single-child groups.
    fn nested(levels: usize) -> String {
        format!("{}(prio >= 1){}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_at_limit() {
        assert_eq!(parse(&nested(MAX_DEPTH - 1)), Predicate::Priority(1));
    }

    #[test]
    fn nesting_past_limit() {
        assert_eq!(parse_err(&nested(MAX_DEPTH)), ErrorKind::NestingTooDeep(MAX_DEPTH));
        assert_eq!(parse_err(&nested(30_000)), ErrorKind::NestingTooDeep(MAX_DEPTH));

        let negations = format!("{}(prio >= 1){}", "(!".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(parse_err(&negations), ErrorKind::NestingTooDeep(MAX_DEPTH));
    }
}
