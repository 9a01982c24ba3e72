//! Tag types known to the song database.

use std::{fmt, str::FromStr};

use crate::error::ErrorKind;

/// A metadata field a song can carry zero or more values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum TagType {
    Artist,
    ArtistSort,
    Album,
    AlbumSort,
    AlbumArtist,
    AlbumArtistSort,
    Title,
    TitleSort,
    Track,
    Name,
    Genre,
    Mood,
    Date,
    OriginalDate,
    Composer,
    ComposerSort,
    Performer,
    Conductor,
    Work,
    Ensemble,
    Movement,
    MovementNumber,
    ShowMovement,
    Location,
    Grouping,
    Comment,
    Disc,
    Label,
    MusicBrainzArtistId,
    MusicBrainzAlbumId,
    MusicBrainzAlbumArtistId,
    MusicBrainzTrackId,
    MusicBrainzReleaseTrackId,
    MusicBrainzWorkId,
    MusicBrainzReleaseGroupId,
}

impl TagType {
    /// Every tag type, in protocol order.
    pub const ALL: [Self; 35] = [
        Self::Artist,
        Self::ArtistSort,
        Self::Album,
        Self::AlbumSort,
        Self::AlbumArtist,
        Self::AlbumArtistSort,
        Self::Title,
        Self::TitleSort,
        Self::Track,
        Self::Name,
        Self::Genre,
        Self::Mood,
        Self::Date,
        Self::OriginalDate,
        Self::Composer,
        Self::ComposerSort,
        Self::Performer,
        Self::Conductor,
        Self::Work,
        Self::Ensemble,
        Self::Movement,
        Self::MovementNumber,
        Self::ShowMovement,
        Self::Location,
        Self::Grouping,
        Self::Comment,
        Self::Disc,
        Self::Label,
        Self::MusicBrainzArtistId,
        Self::MusicBrainzAlbumId,
        Self::MusicBrainzAlbumArtistId,
        Self::MusicBrainzTrackId,
        Self::MusicBrainzReleaseTrackId,
        Self::MusicBrainzWorkId,
        Self::MusicBrainzReleaseGroupId,
    ];

    /// The canonical protocol name of this tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Artist => "Artist",
            Self::ArtistSort => "ArtistSort",
            Self::Album => "Album",
            Self::AlbumSort => "AlbumSort",
            Self::AlbumArtist => "AlbumArtist",
            Self::AlbumArtistSort => "AlbumArtistSort",
            Self::Title => "Title",
            Self::TitleSort => "TitleSort",
            Self::Track => "Track",
            Self::Name => "Name",
            Self::Genre => "Genre",
            Self::Mood => "Mood",
            Self::Date => "Date",
            Self::OriginalDate => "OriginalDate",
            Self::Composer => "Composer",
            Self::ComposerSort => "ComposerSort",
            Self::Performer => "Performer",
            Self::Conductor => "Conductor",
            Self::Work => "Work",
            Self::Ensemble => "Ensemble",
            Self::Movement => "Movement",
            Self::MovementNumber => "MovementNumber",
            Self::ShowMovement => "ShowMovement",
            Self::Location => "Location",
            Self::Grouping => "Grouping",
            Self::Comment => "Comment",
            Self::Disc => "Disc",
            Self::Label => "Label",
            Self::MusicBrainzArtistId => "MUSICBRAINZ_ARTISTID",
            Self::MusicBrainzAlbumId => "MUSICBRAINZ_ALBUMID",
            Self::MusicBrainzAlbumArtistId => "MUSICBRAINZ_ALBUMARTISTID",
            Self::MusicBrainzTrackId => "MUSICBRAINZ_TRACKID",
            Self::MusicBrainzReleaseTrackId => "MUSICBRAINZ_RELEASETRACKID",
            Self::MusicBrainzWorkId => "MUSICBRAINZ_WORKID",
            Self::MusicBrainzReleaseGroupId => "MUSICBRAINZ_RELEASEGROUPID",
        }
    }

    /// Looks up a tag by name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }
}

impl FromStr for TagType {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ErrorKind::UnknownFilterType(s.to_string()))
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
