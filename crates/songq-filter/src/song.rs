//! The song metadata a filter is evaluated against.

use chrono::{DateTime, Utc};

use crate::{audio_format::AudioFormat, tag::TagType};

/// One tag value on a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    /// Which field this value belongs to.
    pub tag: TagType,
    /// The value.
    pub value: String,
}

/// Read access to a song's metadata.
pub trait Song {
    /// Location of the song relative to the music directory.
    fn uri(&self) -> &str;

    /// All tag values, in file order. A tag type may appear any number of times.
    fn tags(&self) -> &[TagItem];

    /// Time of the last modification of the file, if known.
    fn last_modified(&self) -> Option<DateTime<Utc>>;

    /// Time the song was added to the library, if known.
    fn added(&self) -> Option<DateTime<Utc>>;

    /// The decoded audio format, if known.
    fn audio_format(&self) -> Option<AudioFormat>;

    /// Queue priority, 0 being the lowest.
    fn priority(&self) -> u8;
}

/// An owned song record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongRecord {
    /// Location relative to the music directory.
    pub uri: String,
    /// Tag values.
    pub tags: Vec<TagItem>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// Time added to the library.
    pub added: Option<DateTime<Utc>>,
    /// Audio format.
    pub audio_format: Option<AudioFormat>,
    /// Queue priority.
    pub priority: u8,
}

impl SongRecord {
    /// Creates a record with no metadata.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Adds a tag value.
    pub fn with_tag(mut self, tag: TagType, value: impl Into<String>) -> Self {
        self.tags.push(TagItem {
            tag,
            value: value.into(),
        });
        self
    }

    /// Sets the modification time.
    pub fn with_last_modified(mut self, time: DateTime<Utc>) -> Self {
        self.last_modified = Some(time);
        self
    }

    /// Sets the time added.
    pub fn with_added(mut self, time: DateTime<Utc>) -> Self {
        self.added = Some(time);
        self
    }

    /// Sets the audio format.
    pub fn with_audio_format(mut self, format: AudioFormat) -> Self {
        self.audio_format = Some(format);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

impl Song for SongRecord {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn tags(&self) -> &[TagItem] {
        &self.tags
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    fn added(&self) -> Option<DateTime<Utc>> {
        self.added
    }

    fn audio_format(&self) -> Option<AudioFormat> {
        self.audio_format
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
