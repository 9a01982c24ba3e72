//! JSON song libraries and the filter scan driver.
//!
//! A library file holds songs at the top level plus any number of mounts. Songs inside a
//! mount carry URIs relative to the mount point, the way a mounted storage sees them:
//!
//! ```json
//! {
//!   "songs": [
//!     { "uri": "rock/a.flac", "tags": { "Artist": "Air", "Genre": ["Rock", "Pop"] } }
//!   ],
//!   "mounts": [
//!     { "path": "nas", "songs": [{ "uri": "jazz/b.flac", "priority": 3 }] }
//!   ]
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
use songq_filter::{
    AudioFormat, AudioFormatError, Predicate, SongFilter, SongRecord, TagItem, TagType,
    uri::{is_child_or_same, is_safe_local},
};
use thiserror::Error;
use tracing::debug;

/// Errors from loading a library file.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The file could not be read.
    #[error("failed to read library {path}: {source}")]
    Read {
        /// Library file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid library JSON.
    #[error("failed to parse library {path}: {source}")]
    Parse {
        /// Library file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A song uses a tag name that is not known.
    #[error("song {uri}: unknown tag '{tag}'")]
    UnknownTag {
        /// URI of the offending song.
        uri: String,
        /// The tag name as written.
        tag: String,
    },

    /// A song's audio format does not parse.
    #[error("song {uri}: invalid audio format '{value}': {source}")]
    InvalidAudioFormat {
        /// URI of the offending song.
        uri: String,
        /// The format as written.
        value: String,
        /// Why the format was rejected.
        source: AudioFormatError,
    },

    /// A song or mount location is not a safe relative path.
    #[error("invalid location '{0}': must be a relative path without '.' or '..' segments")]
    BadLocation(String),
}

/// Library file as written on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLibrary {
    /// Songs at the top level.
    songs: Vec<RawSong>,
    /// Mounted storages.
    mounts: Vec<RawMount>,
}

/// A mount as written on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMount {
    /// Mount point.
    path: String,
    /// Songs, relative to the mount point.
    #[serde(default)]
    songs: Vec<RawSong>,
}

/// A song as written on disk.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSong {
    /// Location.
    uri: String,
    /// Tag name to one value or a list of values.
    #[serde_as(as = "BTreeMap<_, OneOrMany<_>>")]
    #[serde(default)]
    tags: BTreeMap<String, Vec<String>>,
    /// RFC 3339 modification time.
    last_modified: Option<DateTime<Utc>>,
    /// RFC 3339 time the song was added.
    added: Option<DateTime<Utc>>,
    /// `rate:format:channels`.
    audio_format: Option<String>,
    /// Queue priority.
    #[serde(default)]
    priority: u8,
}

impl RawSong {
    /// Validates the song and converts it to a record.
    fn into_record(self) -> Result<SongRecord, LibraryError> {
        if !is_safe_local(&self.uri) {
            return Err(LibraryError::BadLocation(self.uri));
        }

        let mut tags = Vec::new();
        for (name, values) in self.tags {
            let Some(tag) = TagType::parse(&name) else {
                return Err(LibraryError::UnknownTag {
                    uri: self.uri,
                    tag: name,
                });
            };
            tags.extend(values.into_iter().map(|value| TagItem { tag, value }));
        }

        let audio_format = match self.audio_format {
            Some(value) => match AudioFormat::parse(&value, false) {
                Ok(format) => Some(format),
                Err(source) => {
                    return Err(LibraryError::InvalidAudioFormat {
                        uri: self.uri,
                        value,
                        source,
                    });
                }
            },
            None => None,
        };

        Ok(SongRecord {
            uri: self.uri,
            tags,
            last_modified: self.last_modified,
            added: self.added,
            audio_format,
            priority: self.priority,
        })
    }
}

/// Songs stored below a mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Mount point relative to the library root.
    pub path: String,
    /// Songs with URIs relative to [`path`](Self::path).
    pub songs: Vec<SongRecord>,
}

impl Mount {
    /// Full URI of a song in this mount.
    fn uri_of(&self, song: &SongRecord) -> String {
        format!("{}/{}", self.path, song.uri)
    }
}

/// A loaded song library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    /// Songs at the top level.
    pub songs: Vec<SongRecord>,
    /// Mounted storages.
    pub mounts: Vec<Mount>,
}

impl Library {
    /// Reads and validates a library file.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let contents = fs::read_to_string(path).map_err(|source| LibraryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, path)
    }

    /// Parses library JSON. `path` is only used for error reporting.
    pub fn from_json(contents: &str, path: &Path) -> Result<Self, LibraryError> {
        let raw: RawLibrary =
            serde_json::from_str(contents).map_err(|source| LibraryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let songs = raw
            .songs
            .into_iter()
            .map(RawSong::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        let mut mounts = Vec::with_capacity(raw.mounts.len());
        for mount in raw.mounts {
            if !is_safe_local(&mount.path) {
                return Err(LibraryError::BadLocation(mount.path));
            }
            let songs = mount
                .songs
                .into_iter()
                .map(RawSong::into_record)
                .collect::<Result<Vec<_>, _>>()?;
            mounts.push(Mount {
                path: mount.path,
                songs,
            });
        }

        debug!(songs = songs.len(), mounts = mounts.len(), "loaded library");
        Ok(Self { songs, mounts })
    }

    /// Total number of songs, mounted ones included.
    pub fn len(&self) -> usize {
        self.songs.len() + self.mounts.iter().map(|m| m.songs.len()).sum::<usize>()
    }

    /// Whether the library holds no songs at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the full URIs of every song matching `filter`, top-level songs first.
    ///
    /// Mounted songs are matched by a filter derived for the mount, which sees URIs relative
    /// to the mount point. Mounts that lie outside a top-level `base` are skipped whole.
    pub fn find(&self, filter: &SongFilter) -> Vec<String> {
        let mut found = Vec::new();

        let base = filter.base();
        for song in &self.songs {
            if base.is_some_and(|base| !is_child_or_same(base, &song.uri)) {
                continue;
            }
            if filter.matches(song) {
                found.push(song.uri.clone());
            }
        }

        for mount in &self.mounts {
            let Some(derived) = mount_filter(filter, &mount.path) else {
                debug!(mount = %mount.path, "mount outside base, skipped");
                continue;
            };

            if !derived.has_other_than_base() && derived.base().is_none() {
                debug!(mount = %mount.path, songs = mount.songs.len(), "mount matched whole");
                found.extend(mount.songs.iter().map(|song| mount.uri_of(song)));
                continue;
            }

            debug!(mount = %mount.path, filter = %derived.to_expression(), "delegating to mount");
            let base = derived.base();
            for song in &mount.songs {
                if base.is_some_and(|base| !is_child_or_same(base, &song.uri)) {
                    continue;
                }
                if derived.matches(song) {
                    found.push(mount.uri_of(song));
                }
            }
        }

        found
    }
}

/// Derives the filter to run inside the mount at `mount`.
///
/// Top-level `base` constraints that contain the whole mount are satisfied and dropped;
/// ones below it become mount-relative. Returns `None` if some top-level `base` excludes
/// the mount. Constraints nested in `AND` or `!` are rewritten by [`relative_to_mount`].
fn mount_filter(filter: &SongFilter, mount: &str) -> Option<SongFilter> {
    let mut items = Vec::with_capacity(filter.items().len());
    for item in filter.items() {
        match item {
            Predicate::Base(base) if is_child_or_same(base, mount) => {}
            Predicate::Base(base) if !is_child_or_same(mount, base) => return None,
            _ => items.push(relative_to_mount(item, mount)),
        }
    }
    Some(SongFilter::from_items(items))
}

/// Rewrites every `base` in `predicate` for URIs relative to `mount`.
///
/// A `base` containing the mount holds for all of its songs and becomes an empty `AND`.
/// One outside the mount holds for none and becomes the negation of that.
fn relative_to_mount(predicate: &Predicate, mount: &str) -> Predicate {
    match predicate {
        Predicate::Base(base) if is_child_or_same(base, mount) => Predicate::And(Vec::new()),
        Predicate::Base(base) => {
            let inside = base
                .strip_prefix(mount)
                .and_then(|rest| rest.strip_prefix('/'));
            match inside {
                Some("") => Predicate::And(Vec::new()),
                Some(rest) => Predicate::Base(rest.to_string()),
                None => Predicate::not(Predicate::And(Vec::new())),
            }
        }
        Predicate::And(items) => Predicate::And(
            items
                .iter()
                .map(|item| relative_to_mount(item, mount))
                .collect(),
        ),
        Predicate::Not(inner) => Predicate::not(relative_to_mount(inner, mount)),
        leaf => leaf.clone(),
    }
}
