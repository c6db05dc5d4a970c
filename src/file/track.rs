use crate::{
    bytes::Channel,
    event::{ChannelEvent, Event, EventPayload, MetaEvent, SysExEvent, SysExKind, VoiceKind},
    reader::{ParseError, ParseErrorKind, ReadResult, Reader},
    vlq,
};

pub(crate) const TRACK_MAGIC: &[u8; 4] = b"MTrk";

#[doc = r#"
An ordered sequence of [`Event`]s plus a cached serialized byte length.

Event order is both the wire order and the per-track playback order. The
cached length is the byte count a re-serialization of the events would
take; the alteration engine keeps it consistent whenever it changes an
event's delta-time.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<Event>,
    byte_len: u32,
    has_end_of_track: bool,
}

impl Track {
    /// Builds a track from events, computing the cached length as the sum
    /// of each event's standalone encoding (no running status assumed).
    pub fn new(events: Vec<Event>) -> Self {
        let byte_len = events.iter().map(Event::encoded_len).sum();
        let has_end_of_track = events.last().is_some_and(|e| {
            matches!(e.payload(), EventPayload::Meta(m) if m.is_end_of_track())
        });
        Self {
            events,
            byte_len,
            has_end_of_track,
        }
    }

    /// The track's events, in wire order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access to the events.
    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
    }

    /// The cached serialized length of the event data, in bytes.
    pub const fn byte_len(&self) -> u32 {
        self.byte_len
    }

    pub(crate) const fn set_byte_len(&mut self, byte_len: u32) {
        self.byte_len = byte_len;
    }

    /// False when the track's declared bytes ran out before an
    /// end-of-track sentinel appeared.
    pub const fn has_end_of_track(&self) -> bool {
        self.has_end_of_track
    }

    /// The track's total duration in ticks.
    pub fn tick_len(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.delta_time())).sum()
    }

    /// Reads one `MTrk` chunk: tag, big-endian length, then events until
    /// the declared length is consumed or the end-of-track sentinel ends
    /// the track early (surplus declared bytes are stepped over).
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag_position = reader.position();
        let tag = reader.read_array::<4>()?;
        if &tag != TRACK_MAGIC {
            return Err(ParseError::new(
                tag_position,
                ParseErrorKind::BadMagic {
                    expected: *TRACK_MAGIC,
                    found: tag,
                },
            ));
        }

        let declared = reader.read_u32_be()?;
        let start = reader.position();
        let end = start + declared as usize;

        let mut events = Vec::new();
        let mut running: Option<(VoiceKind, Channel)> = None;
        let mut terminated = false;

        while reader.position() < end && !terminated {
            let delta = vlq::decode(reader)?.value.min(vlq::MAX);

            let status_position = reader.position();
            let status = reader.read_u8()?;
            let payload = match status {
                0xFF => {
                    running = None;
                    let after_type = end.saturating_sub(reader.position() + 1) as u32;
                    let meta = MetaEvent::read(reader, after_type)?;
                    terminated = meta.is_end_of_track();
                    EventPayload::Meta(meta)
                }
                0xF0 | 0xF7 => {
                    running = None;
                    let kind = if status == 0xF0 {
                        SysExKind::PacketStart
                    } else {
                        SysExKind::PacketEscape
                    };
                    EventPayload::SysEx(SysExEvent::read(reader, kind)?)
                }
                status if status & 0x80 != 0 => {
                    let kind = VoiceKind::try_from(status >> 4).map_err(|_| {
                        ParseError::new(status_position, ParseErrorKind::UnknownEventType(status))
                    })?;
                    let channel = Channel::from_status(status);
                    running = Some((kind, channel));
                    EventPayload::Channel(ChannelEvent::read(reader, kind, channel, None)?)
                }
                first => {
                    // running status: the byte just read is the first data byte
                    let Some((kind, channel)) = running else {
                        return Err(ParseError::new(
                            status_position,
                            ParseErrorKind::UnknownEventType(first),
                        ));
                    };
                    EventPayload::Channel(ChannelEvent::read(reader, kind, channel, Some(first))?)
                }
            };
            events.push(Event::new(delta, payload));

            if reader.position() > end {
                return Err(ParseError::new(
                    reader.position(),
                    ParseErrorKind::ChunkLengthMismatch {
                        declared,
                        consumed: (reader.position() - start) as u32,
                    },
                ));
            }
        }

        let consumed = (reader.position() - start) as u32;
        if reader.position() < end {
            tracing::debug!(
                surplus = end - reader.position(),
                "skipping declared track bytes after end-of-track"
            );
            reader.skip(end - reader.position())?;
        }

        Ok(Self {
            events,
            byte_len: consumed,
            has_end_of_track: terminated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track_bytes(body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::from(*TRACK_MAGIC);
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn reads_events_until_declared_length() {
        let bytes = track_bytes(&[
            0x00, 0x90, 0x3C, 0x40, // note on
            0x60, 0x80, 0x3C, 0x40, // note off
            0x00, 0xFF, 0x2F, 0x00, // end of track
        ]);
        let mut reader = Reader::new(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.events().len(), 3);
        assert_eq!(track.byte_len(), 12);
        assert!(track.has_end_of_track());
        assert_eq!(track.tick_len(), 0x60);
    }

    #[test]
    fn running_status_reuses_previous_status() {
        let bytes = track_bytes(&[
            0x00, 0x90, 0x3C, 0x40, // explicit status
            0x10, 0x3E, 0x40, // running status, still note on channel 0
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let mut reader = Reader::new(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.events().len(), 3);
        let second = &track.events()[1];
        assert_eq!(second.note(), Some(0x3E));
        assert_eq!(second.channel().map(|c| c.value()), Some(0));
        // running status saved a status byte relative to a standalone encoding
        assert_eq!(track.byte_len(), 11);
    }

    #[test]
    fn leading_data_byte_without_status_is_rejected() {
        let bytes = track_bytes(&[0x00, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00]);
        let mut reader = Reader::new(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert_eq!(*err.kind(), ParseErrorKind::UnknownEventType(0x3C));
    }

    #[test]
    fn system_realtime_status_is_rejected() {
        let bytes = track_bytes(&[0x00, 0xF8, 0x00]);
        let mut reader = Reader::new(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert_eq!(*err.kind(), ParseErrorKind::UnknownEventType(0xF8));
    }

    #[test]
    fn overrunning_event_is_a_length_mismatch() {
        // declared length cuts the note-on's data bytes in half
        let mut bytes = Vec::from(*TRACK_MAGIC);
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x90, 0x3C, 0x40]);
        let mut reader = Reader::new(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::ChunkLengthMismatch { declared: 3, .. }
        ));
    }

    #[test]
    fn end_of_track_stops_before_declared_end() {
        let bytes = track_bytes(&[
            0x00, 0xFF, 0x2F, 0x00, // end of track
            0x00, 0x90, 0x3C, 0x40, // declared but unreachable
        ]);
        let mut reader = Reader::new(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.events().len(), 1);
        assert!(track.has_end_of_track());
        assert_eq!(track.byte_len(), 4);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn missing_end_of_track_is_tolerated() {
        let bytes = track_bytes(&[0x00, 0x90, 0x3C, 0x40]);
        let mut reader = Reader::new(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.events().len(), 1);
        assert!(!track.has_end_of_track());
    }

    #[test]
    fn sysex_and_meta_cancel_running_status() {
        let bytes = track_bytes(&[
            0x00, 0x90, 0x3C, 0x40, // note on, establishes running status
            0x00, 0xF0, 0x01, 0x7E, // sysex cancels it
            0x00, 0x3E, 0x40, // would-be running status is now an error
        ]);
        let mut reader = Reader::new(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert_eq!(*err.kind(), ParseErrorKind::UnknownEventType(0x3E));
    }
}
