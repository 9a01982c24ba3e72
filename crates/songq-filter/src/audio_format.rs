//! Audio format specifications such as `44100:16:2`.
//!
//! A format has three colon-separated fields: sample rate, sample format and channel
//! count. In mask mode any field may be `*`, which matches every value.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Largest accepted sample rate (exclusive).
const MAX_SAMPLE_RATE: u32 = 1 << 30;

/// Largest accepted channel count.
const MAX_CHANNELS: u8 = 8;

/// Errors from parsing an audio format specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioFormatError {
    /// The text does not have exactly three fields.
    #[error("expected SAMPLERATE:FORMAT:CHANNELS")]
    FieldCount,
    /// The sample rate is not a number in range.
    #[error("invalid sample rate: {0}")]
    SampleRate(String),
    /// The sample format is not one of the known names.
    #[error("unknown sample format: {0}")]
    SampleFormat(String),
    /// The channel count is not a number in range.
    #[error("invalid channel count: {0}")]
    Channels(String),
    /// A `*` wildcard outside of mask mode.
    #[error("wildcards are only allowed in a mask")]
    UnexpectedWildcard,
}

/// Sample encoding of a PCM or DSD stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// Signed 8 bit.
    S8,
    /// Signed 16 bit.
    S16,
    /// Signed 24 bit in a 32 bit container.
    S24P32,
    /// Signed 24 bit, packed.
    S24,
    /// Signed 32 bit.
    S32,
    /// 32 bit floating point.
    Float,
    /// Direct Stream Digital.
    Dsd,
}

impl SampleFormat {
    /// All sample formats.
    const ALL: [Self; 7] = [
        Self::S8,
        Self::S16,
        Self::S24P32,
        Self::S24,
        Self::S32,
        Self::Float,
        Self::Dsd,
    ];

    /// Name used in format specifications.
    pub const fn name(self) -> &'static str {
        match self {
            Self::S8 => "8",
            Self::S16 => "16",
            Self::S24P32 => "24",
            Self::S24 => "24_3",
            Self::S32 => "32",
            Self::Float => "f",
            Self::Dsd => "dsd",
        }
    }

    /// Looks up a sample format by its specification name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }
}

/// An audio format, or a mask when some fields are unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AudioFormat {
    /// Samples per second.
    pub sample_rate: Option<u32>,
    /// Sample encoding.
    pub format: Option<SampleFormat>,
    /// Number of channels.
    pub channels: Option<u8>,
}

impl AudioFormat {
    /// Creates a fully defined format.
    pub const fn new(sample_rate: u32, format: SampleFormat, channels: u8) -> Self {
        Self {
            sample_rate: Some(sample_rate),
            format: Some(format),
            channels: Some(channels),
        }
    }

    /// Whether every field is set.
    pub fn is_fully_defined(&self) -> bool {
        self.sample_rate.is_some() && self.format.is_some() && self.channels.is_some()
    }

    /// Checks the fields that are set in `mask`; unset mask fields match anything.
    pub fn matches_mask(&self, mask: &Self) -> bool {
        fn field_matches<T: PartialEq>(value: Option<T>, mask: Option<T>) -> bool {
            mask.is_none() || value == mask
        }

        field_matches(self.sample_rate, mask.sample_rate)
            && field_matches(self.format, mask.format)
            && field_matches(self.channels, mask.channels)
    }

    /// Parses `SAMPLERATE:FORMAT:CHANNELS`. With `mask`, each field may be `*`.
    pub fn parse(text: &str, mask: bool) -> Result<Self, AudioFormatError> {
        let fields: Vec<&str> = text.split(':').collect();
        let [rate, format, channels] = fields.as_slice() else {
            return Err(AudioFormatError::FieldCount);
        };

        Ok(Self {
            sample_rate: parse_field(rate, mask, parse_sample_rate)?,
            format: parse_field(format, mask, |s| {
                SampleFormat::parse(s).ok_or_else(|| AudioFormatError::SampleFormat(s.to_string()))
            })?,
            channels: parse_field(channels, mask, parse_channels)?,
        })
    }
}

/// Parses one field, mapping `*` to `None` in mask mode.
fn parse_field<T>(
    text: &str,
    mask: bool,
    parse: impl FnOnce(&str) -> Result<T, AudioFormatError>,
) -> Result<Option<T>, AudioFormatError> {
    match text {
        "*" if mask => Ok(None),
        "*" => Err(AudioFormatError::UnexpectedWildcard),
        _ => parse(text).map(Some),
    }
}

/// Parses a sample rate in `1..MAX_SAMPLE_RATE`.
fn parse_sample_rate(text: &str) -> Result<u32, AudioFormatError> {
    match text.parse::<u32>() {
        Ok(rate) if rate > 0 && rate < MAX_SAMPLE_RATE => Ok(rate),
        _ => Err(AudioFormatError::SampleRate(text.to_string())),
    }
}

/// Parses a channel count in `1..=MAX_CHANNELS`.
fn parse_channels(text: &str) -> Result<u8, AudioFormatError> {
    match text.parse::<u8>() {
        Ok(channels) if channels > 0 && channels <= MAX_CHANNELS => Ok(channels),
        _ => Err(AudioFormatError::Channels(text.to_string())),
    }
}

impl FromStr for AudioFormat {
    type Err = AudioFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sample_rate {
            Some(rate) => write!(f, "{rate}:")?,
            None => f.write_str("*:")?,
        }
        match self.format {
            Some(format) => write!(f, "{}:", format.name())?,
            None => f.write_str("*:")?,
        }
        match self.channels {
            Some(channels) => write!(f, "{channels}"),
            None => f.write_str("*"),
        }
    }
}
