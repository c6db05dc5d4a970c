use crate::{
    reader::{ParseErrorKind, ReadResult, Reader},
    vlq,
};

#[doc = r#"
A meta event: a non-sounding annotation internal to the file format.

The meta-type byte selects the annotation (tempo, track name, marker, ...)
and the payload is a raw byte block whose length is VLQ-encoded on the
wire. A handful of meta types carry a fixed payload size; the parser
rejects declarations that disagree.

The end-of-track sentinel ([`MetaEvent::END_OF_TRACK`]) is the canonical
track terminator.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    pub(crate) meta_type: u8,
    pub(crate) data: Vec<u8>,
}

impl MetaEvent {
    /// `FF 00`: sequence number.
    pub const SEQUENCE_NUMBER: u8 = 0x00;
    /// `FF 01`: free text.
    pub const TEXT: u8 = 0x01;
    /// `FF 02`: copyright notice.
    pub const COPYRIGHT: u8 = 0x02;
    /// `FF 03`: sequence or track name.
    pub const TRACK_NAME: u8 = 0x03;
    /// `FF 04`: instrument name.
    pub const INSTRUMENT_NAME: u8 = 0x04;
    /// `FF 05`: lyric.
    pub const LYRIC: u8 = 0x05;
    /// `FF 06`: marker.
    pub const MARKER: u8 = 0x06;
    /// `FF 07`: cue point.
    pub const CUE_POINT: u8 = 0x07;
    /// `FF 08`: program name.
    pub const PROGRAM_NAME: u8 = 0x08;
    /// `FF 09`: device name.
    pub const DEVICE_NAME: u8 = 0x09;
    /// `FF 20`: MIDI channel prefix.
    pub const CHANNEL_PREFIX: u8 = 0x20;
    /// `FF 21`: MIDI port.
    pub const MIDI_PORT: u8 = 0x21;
    /// `FF 2F`: end of track.
    pub const END_OF_TRACK: u8 = 0x2F;
    /// `FF 51`: set tempo, in microseconds per quarter note.
    pub const SET_TEMPO: u8 = 0x51;
    /// `FF 54`: SMPTE offset.
    pub const SMPTE_OFFSET: u8 = 0x54;
    /// `FF 58`: time signature.
    pub const TIME_SIGNATURE: u8 = 0x58;
    /// `FF 59`: key signature.
    pub const KEY_SIGNATURE: u8 = 0x59;
    /// `FF 7F`: sequencer-specific data.
    pub const SEQUENCER_SPECIFIC: u8 = 0x7F;

    /// Creates a meta event from a type byte and raw payload.
    pub const fn new(meta_type: u8, data: Vec<u8>) -> Self {
        Self { meta_type, data }
    }

    /// The meta-type byte.
    pub const fn meta_type(&self) -> u8 {
        self.meta_type
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True for the end-of-track sentinel.
    pub const fn is_end_of_track(&self) -> bool {
        self.meta_type == Self::END_OF_TRACK
    }

    /// The human-readable name of the meta type, when standardized.
    pub const fn name(&self) -> Option<&'static str> {
        Some(match self.meta_type {
            Self::SEQUENCE_NUMBER => "Sequence Number",
            Self::TEXT => "Text Event",
            Self::COPYRIGHT => "Copyright",
            Self::TRACK_NAME => "Sequence/Track Name",
            Self::INSTRUMENT_NAME => "Instrument Name",
            Self::LYRIC => "Lyric",
            Self::MARKER => "Marker",
            Self::CUE_POINT => "Cue Point",
            Self::PROGRAM_NAME => "Program Name",
            Self::DEVICE_NAME => "Device Name",
            Self::CHANNEL_PREFIX => "MIDI Channel Prefix",
            Self::MIDI_PORT => "MIDI Port",
            Self::END_OF_TRACK => "End of Track",
            Self::SET_TEMPO => "Set Tempo",
            Self::SMPTE_OFFSET => "SMPTE Offset",
            Self::TIME_SIGNATURE => "Time Signature",
            Self::KEY_SIGNATURE => "Key Signature",
            Self::SEQUENCER_SPECIFIC => "Sequencer-Specific Meta-event",
            _ => return None,
        })
    }

    /// The payload length the format fixes for `meta_type`, if any.
    pub const fn fixed_length(meta_type: u8) -> Option<u32> {
        Some(match meta_type {
            Self::SEQUENCE_NUMBER => 2,
            Self::CHANNEL_PREFIX | Self::MIDI_PORT => 1,
            Self::END_OF_TRACK => 0,
            Self::SET_TEMPO => 3,
            Self::SMPTE_OFFSET => 5,
            Self::TIME_SIGNATURE => 4,
            Self::KEY_SIGNATURE => 2,
            _ => return None,
        })
    }

    /// The tempo in microseconds per quarter note, for Set Tempo events.
    pub fn tempo(&self) -> Option<u32> {
        if self.meta_type != Self::SET_TEMPO {
            return None;
        }
        let &[a, b, c] = self.data.as_slice() else {
            return None;
        };
        Some(u32::from_be_bytes([0, a, b, c]))
    }

    /// Reads a meta event, the `0xFF` status byte already consumed.
    ///
    /// The end-of-track sentinel may legally sit at the exact end of its
    /// chunk with its zero length byte cut off; `remaining_in_chunk` tells
    /// the reader whether a length byte can still be expected.
    pub(crate) fn read(reader: &mut Reader<'_>, remaining_in_chunk: u32) -> ReadResult<Self> {
        let meta_type = reader.read_u8()?;

        if meta_type == Self::END_OF_TRACK && remaining_in_chunk == 0 {
            return Ok(Self::new(meta_type, Vec::new()));
        }

        let declared = vlq::decode(reader)?.value;
        if let Some(expected) = Self::fixed_length(meta_type)
            && declared != expected
        {
            return Err(reader.err(ParseErrorKind::InvalidMetaLength {
                meta_type,
                declared,
                expected,
            }));
        }

        let data = reader.read_bytes(declared as usize)?.to_vec();
        Ok(Self::new(meta_type, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_set_tempo() {
        // 120 bpm = 500_000 us per quarter note
        let mut reader = Reader::new(&[0x51, 0x03, 0x07, 0xA1, 0x20]);
        let meta = MetaEvent::read(&mut reader, 5).unwrap();
        assert_eq!(meta.meta_type(), MetaEvent::SET_TEMPO);
        assert_eq!(meta.tempo(), Some(500_000));
        assert_eq!(meta.name(), Some("Set Tempo"));
    }

    #[test]
    fn rejects_wrong_fixed_length() {
        let mut reader = Reader::new(&[0x51, 0x02, 0x07, 0xA1]);
        let err = MetaEvent::read(&mut reader, 4).unwrap_err();
        assert_eq!(
            *err.kind(),
            ParseErrorKind::InvalidMetaLength {
                meta_type: MetaEvent::SET_TEMPO,
                declared: 2,
                expected: 3,
            }
        );
    }

    #[test]
    fn end_of_track_without_length_byte() {
        let mut reader = Reader::new(&[0x2F]);
        let meta = MetaEvent::read(&mut reader, 0).unwrap();
        assert!(meta.is_end_of_track());
        assert!(meta.data().is_empty());
    }

    #[test]
    fn variable_length_meta() {
        let mut reader = Reader::new(&[0x03, 0x04, b'a', b'b', b'c', b'd']);
        let meta = MetaEvent::read(&mut reader, 6).unwrap();
        assert_eq!(meta.meta_type(), MetaEvent::TRACK_NAME);
        assert_eq!(meta.data(), b"abcd");
    }
}
