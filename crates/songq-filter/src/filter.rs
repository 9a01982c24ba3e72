//! The top-level song filter.

use std::{fmt, mem};

use tracing::debug;

use crate::{
    ast::{Predicate, and_expression},
    error::{ErrorKind, FilterError},
    optimize::optimize_items,
    parser,
    song::Song,
};

/// A conjunction of predicates that songs are matched against.
///
/// An empty filter matches every song. Filters are built with the `parse*` methods,
/// optionally [optimized](Self::optimize), and then only read, so a finished filter can be
/// shared between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongFilter {
    /// Top-level items, all of which must match.
    items: Vec<Predicate>,
}

impl SongFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from top-level items.
    pub fn from_items(items: Vec<Predicate>) -> Self {
        Self { items }
    }

    /// Builds a filter from command arguments.
    ///
    /// See [`parse_args`](Self::parse_args).
    pub fn parse<S: AsRef<str>>(args: &[S], fold_case: bool) -> Result<Self, FilterError> {
        let mut filter = Self::new();
        filter.parse_args(args, fold_case)?;
        Ok(filter)
    }

    /// Builds a filter from one parenthesized expression.
    pub fn parse_expression(text: &str, fold_case: bool) -> Result<Self, FilterError> {
        let predicate = parser::parse_expression(text, fold_case)?;
        debug!(expression = text, "parsed filter expression");
        Ok(Self::from_items(vec![predicate]))
    }

    /// Appends the predicates described by command arguments.
    ///
    /// Each argument starting with `(` is a complete expression. Other arguments are taken
    /// in `TAG VALUE` pairs; when `fold_case` is set those compare case-insensitively and
    /// match substrings. On error the filter is left unchanged.
    pub fn parse_args<S: AsRef<str>>(&mut self, args: &[S], fold_case: bool) -> Result<(), FilterError> {
        if args.is_empty() {
            return Err(ErrorKind::ArgCount.into());
        }

        let mut parsed = Vec::new();
        let mut rest = args;
        while let Some((first, tail)) = rest.split_first() {
            let first = first.as_ref();
            if first.starts_with('(') {
                parsed.push(parser::parse_expression(first, fold_case)?);
                rest = tail;
                continue;
            }

            let [value, tail @ ..] = tail else {
                return Err(ErrorKind::ArgCount.into());
            };
            parsed.push(parser::parse_pair(first, value.as_ref(), fold_case)?);
            rest = tail;
        }

        debug!(count = parsed.len(), fold_case, "parsed filter arguments");
        self.items.extend(parsed);
        Ok(())
    }

    /// Appends one legacy `TAG VALUE` pair.
    pub fn parse_pair(&mut self, tag: &str, value: &str, fold_case: bool) -> Result<(), FilterError> {
        self.items.push(parser::parse_pair(tag, value, fold_case)?);
        Ok(())
    }

    /// Appends a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.items.push(predicate);
    }

    /// The top-level items.
    pub fn items(&self) -> &[Predicate] {
        &self.items
    }

    /// Whether the filter has no items and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks whether a song matches every item.
    pub fn matches<S: Song + ?Sized>(&self, song: &S) -> bool {
        self.items.iter().all(|item| item.matches(song))
    }

    /// Formats the filter as an expression. An empty filter gives an empty string.
    pub fn to_expression(&self) -> String {
        and_expression(&self.items)
    }

    /// Rewrites the filter into a cheaper equivalent.
    pub fn optimize(&mut self) {
        let before = self.items.len();
        self.items = optimize_items(mem::take(&mut self.items));
        debug!(before, after = self.items.len(), "optimized filter");
    }

    /// Whether any top-level string comparison ignores case.
    pub fn has_fold_case(&self) -> bool {
        self.items.iter().any(|item| match item {
            Predicate::Tag(_, filter) | Predicate::AnyTag(filter) | Predicate::Uri(filter) => {
                filter.fold_case()
            }
            _ => false,
        })
    }

    /// Whether any top-level item is something other than a `base` constraint.
    pub fn has_other_than_base(&self) -> bool {
        self.items
            .iter()
            .any(|item| !matches!(item, Predicate::Base(_)))
    }

    /// The path of the first top-level `base` constraint.
    pub fn base(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            Predicate::Base(path) => Some(path.as_str()),
            _ => None,
        })
    }

    /// Derives the filter for songs below `prefix`, with URIs relative to it.
    ///
    /// `base` constraints equal to `prefix` are dropped since they are already satisfied,
    /// and `prefix/rest` becomes `rest`. Every other item is kept as is.
    pub fn without_base_prefix(&self, prefix: &str) -> Self {
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if let Predicate::Base(path) = item
                && let Some(rest) = path.strip_prefix(prefix)
            {
                if rest.is_empty() {
                    continue;
                }
                if let Some(rest) = rest.strip_prefix('/') {
                    if !rest.is_empty() {
                        items.push(Predicate::Base(rest.to_string()));
                    }
                    continue;
                }
            }
            items.push(item.clone());
        }

        debug!(prefix, before = self.items.len(), after = items.len(), "stripped base prefix");
        Self::from_items(items)
    }
}

impl fmt::Display for SongFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "And")?;
        for item in &self.items {
            item.fmt_tree(f, 1)?;
        }
        Ok(())
    }
}
