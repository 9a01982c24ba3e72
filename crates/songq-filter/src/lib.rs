//! Song filter expressions for a music library.
//!
//! This crate compiles search requests into a predicate tree over song metadata and
//! evaluates that tree against individual songs:
//!
//! - **Tag comparisons**: `(Artist == "Air")`, `(Title contains "love")`
//! - **Case rules**: `eq_ci`, `contains_cs`, `starts_with_ci`, ...
//! - **Regular expressions**: `(Genre =~ "(post-)?rock")`
//! - **Negation**: `(!(Artist == "Air"))`
//! - **Conjunction**: `((Artist == "Air") AND (Date starts_with "19"))`
//! - **Locations**: `(file == "a/b.flac")`, `(base "music/rock")`
//! - **Metadata**: `(modified-since "2024-01-01")`, `(AudioFormat =~ "44100:*:2")`,
//!   `(prio >= 10)`
//!
//! The legacy flat form (`artist Air title Love`) is accepted as well and may be
//! mixed with parenthesized expressions.
//!
//! # Example
//!
//! ```
//! use songq_filter::{SongFilter, SongRecord, TagType};
//!
//! let filter = SongFilter::parse(&["((Artist == \"Air\") AND (Title contains \"Love\"))"], false)
//!     .unwrap();
//! let song = SongRecord::new("air/moon_safari/03.flac")
//!     .with_tag(TagType::Artist, "Air")
//!     .with_tag(TagType::Title, "All I Need is Love");
//! assert!(filter.matches(&song));
//! ```

#![warn(missing_docs)]

mod ast;
mod audio_format;
mod error;
mod eval;
mod filter;
mod lexer;
mod optimize;
mod parser;
mod song;
mod string_filter;
mod tag;
pub mod timestamp;
pub mod uri;

pub use ast::Predicate;
pub use audio_format::{AudioFormat, AudioFormatError, SampleFormat};
pub use error::{ErrorKind, FilterError};
pub use filter::SongFilter;
pub use lexer::MAX_QUOTED_LEN;
pub use parser::{MAX_DEPTH, parse_expression};
pub use song::{Song, SongRecord, TagItem};
pub use string_filter::{Position, StringFilter};
pub use tag::TagType;
