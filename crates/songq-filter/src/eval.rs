//! Predicate evaluation.
//!
//! Evaluation is a pure read of the tree and the song, so a built filter can be shared
//! between threads and evaluated concurrently.

use crate::{ast::Predicate, song::Song, uri::is_child_or_same};

/// Evaluates `predicate` against `song`.
pub fn matches<S: Song + ?Sized>(predicate: &Predicate, song: &S) -> bool {
    match predicate {
        Predicate::Tag(tag, filter) => song
            .tags()
            .iter()
            .filter(|item| item.tag == *tag)
            .any(|item| filter.matches(&item.value)),
        Predicate::AnyTag(filter) => song.tags().iter().any(|item| filter.matches(&item.value)),
        Predicate::Uri(filter) => filter.matches(song.uri()),
        Predicate::Base(path) => is_child_or_same(path, song.uri()),
        Predicate::ModifiedSince(since) => song.last_modified().is_some_and(|time| time >= *since),
        Predicate::AddedSince(since) => song.added().is_some_and(|time| time >= *since),
        Predicate::AudioFormat { format, mask } => song.audio_format().is_some_and(|actual| {
            if *mask {
                actual.matches_mask(format)
            } else {
                actual == *format
            }
        }),
        Predicate::Priority(threshold) => song.priority() >= *threshold,
        Predicate::And(items) => items.iter().all(|item| matches(item, song)),
        Predicate::Not(inner) => !matches(inner, song),
    }
}
