//! Predicate tree rewriting.
//!
//! Rewrites preserve the result of every evaluation and running them twice is the same as
//! running them once.

use tracing::trace;

use crate::ast::Predicate;

/// Optimizes the items of a top-level conjunction.
///
/// Nested conjunctions are spliced into the list; the list itself is never unwrapped.
pub fn optimize_items(items: Vec<Predicate>) -> Vec<Predicate> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match optimize(item) {
            Predicate::And(children) => {
                trace!(count = children.len(), "splicing nested AND");
                result.extend(children);
            }
            other => result.push(other),
        }
    }
    result
}

/// Optimizes one predicate.
fn optimize(predicate: Predicate) -> Predicate {
    match predicate {
        Predicate::And(items) => {
            let items = optimize_items(items);
            match <[Predicate; 1]>::try_from(items) {
                Ok([only]) => {
                    trace!("unwrapping single-item AND");
                    only
                }
                Err(items) => Predicate::And(items),
            }
        }
        Predicate::Not(inner) => match optimize(*inner) {
            Predicate::Not(inner) => {
                trace!("removing double negation");
                *inner
            }
            Predicate::Uri(filter) => {
                trace!("folding negation into URI filter");
                Predicate::Uri(filter.negate())
            }
            // a tag may have several values or none, so only the whole test can be negated
            other => Predicate::not(other),
        },
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        string_filter::{Position, StringFilter},
        tag::TagType,
    };

    fn artist(value: &str) -> Predicate {
        Predicate::Tag(
            TagType::Artist,
            StringFilter::new(value, false, Position::Full, false),
        )
    }

    #[test]
    fn splices_nested_and() {
        let items = vec![
            Predicate::And(vec![artist("a"), Predicate::And(vec![artist("b"), artist("c")])]),
            artist("d"),
        ];
        assert_eq!(
            optimize_items(items),
            vec![artist("a"), artist("b"), artist("c"), artist("d")]
        );
    }

    #[test]
    fn unwraps_single_item_and() {
        let items = vec![Predicate::not(Predicate::And(vec![artist("a")]))];
        assert_eq!(optimize_items(items), vec![Predicate::not(artist("a"))]);
    }

    #[test]
    fn keeps_empty_and_inside_not() {
        let items = vec![Predicate::not(Predicate::And(vec![]))];
        assert_eq!(optimize_items(items.clone()), items);
    }

    #[test]
    fn removes_double_negation() {
        let items = vec![Predicate::not(Predicate::not(artist("a")))];
        assert_eq!(optimize_items(items), vec![artist("a")]);

        let items = vec![Predicate::not(Predicate::not(Predicate::not(artist("a"))))];
        assert_eq!(optimize_items(items), vec![Predicate::not(artist("a"))]);
    }

    #[test]
    fn folds_negated_uri() {
        let filter = StringFilter::new("a/", false, Position::Prefix, false);
        let items = vec![Predicate::not(Predicate::Uri(filter.clone()))];
        assert_eq!(optimize_items(items), vec![Predicate::Uri(filter.negate())]);
    }

    #[test]
    fn keeps_negated_tag() {
        let items = vec![Predicate::not(artist("a"))];
        assert_eq!(optimize_items(items.clone()), items);
    }

    #[test]
    fn idempotent() {
        let items = vec![
            Predicate::And(vec![Predicate::not(Predicate::not(Predicate::And(vec![artist("a")])))]),
            Predicate::not(Predicate::And(vec![artist("b"), Predicate::And(vec![artist("c")])])),
        ];
        let once = optimize_items(items);
        let twice = optimize_items(once.clone());
        assert_eq!(once, twice);
        assert_eq!(
            once,
            vec![
                artist("a"),
                Predicate::not(Predicate::And(vec![artist("b"), artist("c")]))
            ]
        );
    }
}
