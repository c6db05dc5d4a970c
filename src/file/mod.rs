#![doc = r#"
The [`Song`] model and the chunk parser that produces it.

A parse is a strict sequential pull over the byte stream: the `MThd`
header first, then one `MTrk` chunk per track the header declared. Any
structural failure aborts the whole attempt; no partial song escapes.
"#]

mod format;
pub use format::*;

mod division;
pub use division::*;

mod header;

mod track;
pub use track::*;

use crate::reader::{ParseError, Reader};
use header::RawHeader;

#[doc = r#"
A fully parsed MIDI file: format, time division, and tracks.

A song owns its tracks outright. The `name` is not part of the file
format; the discovery collaborator that found the file supplies it, and
the [`Catalog`](crate::Catalog) uses it as the lookup key.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    name: String,
    format: FormatType,
    division: Division,
    tracks: Vec<Track>,
    duration: u64,
    warnings: Vec<ParseWarning>,
}

/// A non-fatal structural oddity noticed while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// A track's declared bytes ran out with no end-of-track sentinel.
    MissingEndOfTrack {
        /// Index of the offending track.
        track: usize,
    },
    /// Bytes remained after the last declared track chunk.
    TrailingBytes {
        /// How many bytes were left unread.
        count: usize,
    },
}

impl Song {
    /// Parses a complete MIDI file from a byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut reader = Reader::new(bytes);
        let RawHeader {
            mut format,
            num_tracks,
            division,
        } = RawHeader::read(&mut reader)?;

        let mut tracks = Vec::with_capacity(usize::from(num_tracks));
        let mut warnings = Vec::new();
        for index in 0..usize::from(num_tracks) {
            let track = Track::read(&mut reader)?;
            if !track.has_end_of_track() {
                tracing::warn!(track = index, "track missing end-of-track sentinel");
                warnings.push(ParseWarning::MissingEndOfTrack { track: index });
            }
            tracks.push(track);
        }

        let remaining = reader.remaining();
        if remaining > 0 {
            tracing::debug!(count = remaining, "trailing bytes after final track chunk");
            warnings.push(ParseWarning::TrailingBytes { count: remaining });
        }

        // A format 0 file holds exactly one track; promote anything that
        // declares more so the invariant holds after parsing.
        if format == FormatType::SingleMultiChannel && tracks.len() > 1 {
            tracing::warn!(tracks = tracks.len(), "format 0 file with multiple tracks");
            format = FormatType::Simultaneous;
        }

        let duration = tracks.iter().map(Track::tick_len).max().unwrap_or(0);

        Ok(Self {
            name: String::new(),
            format,
            division,
            tracks,
            duration,
            warnings,
        })
    }

    /// Parses a file and names the result in one step.
    pub fn parse_named(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ParseError> {
        let mut song = Self::parse(bytes)?;
        song.name = name.into();
        Ok(song)
    }

    /// The song's catalog key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the song's catalog key.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The file's format code.
    pub const fn format(&self) -> FormatType {
        self.format
    }

    /// The header's time division.
    pub const fn division(&self) -> Division {
        self.division
    }

    pub(crate) const fn set_division(&mut self, division: Division) {
        self.division = division;
    }

    /// The song's tracks, in file order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Mutable access to the tracks.
    pub fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    /// The aggregate duration in ticks (the longest track at parse time;
    /// alterations that append tracks extend it).
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    pub(crate) const fn set_duration(&mut self, duration: u64) {
        self.duration = duration;
    }

    /// Oddities the parser tolerated rather than rejected.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Appends a track, promoting format 0 to format 1 once the song
    /// holds more than one track.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
        if self.format == FormatType::SingleMultiChannel && self.tracks.len() > 1 {
            self.format = FormatType::Simultaneous;
        }
    }

    /// A bitmask of the MIDI channels any channel event addresses.
    pub(crate) fn channel_mask(&self) -> u16 {
        let mut mask = 0u16;
        for track in &self.tracks {
            for event in track.events() {
                if let Some(channel) = event.channel() {
                    mask |= 1 << channel.value();
                }
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn single_track_file(body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 1, 0, 96]);
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn parses_single_track_file() {
        let bytes = single_track_file(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x60, 0x80, 0x3C, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let song = Song::parse(&bytes).unwrap();
        assert_eq!(song.format(), FormatType::SingleMultiChannel);
        assert_eq!(song.tracks().len(), 1);
        assert_eq!(song.division().ticks_per_quarter_note(), Some(96));
        assert_eq!(song.duration(), 0x60);
        assert!(song.warnings().is_empty());
    }

    #[test]
    fn parse_is_idempotent_on_well_formed_input() {
        let bytes = single_track_file(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x81, 0x40, 0x80, 0x3C, 0x40, // two-byte delta
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let first = Song::parse(&bytes).unwrap();
        let second = Song::parse(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_end_of_track_is_warned_not_fatal() {
        let bytes = single_track_file(&[0x00, 0x90, 0x3C, 0x40]);
        let song = Song::parse(&bytes).unwrap();
        assert_eq!(
            song.warnings(),
            &[ParseWarning::MissingEndOfTrack { track: 0 }]
        );
    }

    #[test]
    fn trailing_bytes_are_warned() {
        let mut bytes = single_track_file(&[0x00, 0xFF, 0x2F, 0x00]);
        bytes.extend_from_slice(&[0xDE, 0xAD]);
        let song = Song::parse(&bytes).unwrap();
        assert_eq!(song.warnings(), &[ParseWarning::TrailingBytes { count: 2 }]);
    }

    #[test]
    fn add_track_promotes_format() {
        let bytes = single_track_file(&[0x00, 0xFF, 0x2F, 0x00]);
        let mut song = Song::parse(&bytes).unwrap();
        assert_eq!(song.format(), FormatType::SingleMultiChannel);
        let copy = song.tracks()[0].clone();
        song.add_track(copy);
        assert_eq!(song.format(), FormatType::Simultaneous);
        assert_eq!(song.tracks().len(), 2);
    }

    #[test]
    fn format_zero_with_extra_tracks_is_promoted() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 2, 0, 96]);
        for _ in 0..2 {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&4u32.to_be_bytes());
            bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
        }
        let song = Song::parse(&bytes).unwrap();
        assert_eq!(song.format(), FormatType::Simultaneous);
        assert_eq!(song.tracks().len(), 2);
    }

    #[test]
    fn truncated_file_yields_no_song() {
        let bytes = b"MThd\x00\x00\x00\x06\x00\x00";
        assert!(Song::parse(bytes).is_err());
    }
}
