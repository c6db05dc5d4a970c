use crate::{
    bytes::{Channel, DataByte},
    reader::{ParseError, ReadResult, Reader},
};
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
A channel voice event: an operation kind plus the channel it addresses.

On the wire these are a status byte (kind nibble, channel nibble) followed
by one or two 7-bit data bytes, with the status byte omitted under running
status when it repeats the previous event's.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEvent {
    pub(crate) channel: Channel,
    pub(crate) voice: VoiceEvent,
}

impl ChannelEvent {
    /// Pairs a voice operation with a channel.
    pub const fn new(channel: Channel, voice: VoiceEvent) -> Self {
        Self { channel, voice }
    }

    /// The channel this event addresses.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Reassigns the channel.
    pub const fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    /// The voice operation.
    pub const fn voice(&self) -> &VoiceEvent {
        &self.voice
    }

    /// Mutable access to the voice operation.
    pub const fn voice_mut(&mut self) -> &mut VoiceEvent {
        &mut self.voice
    }

    /// Reads the data bytes of a channel event whose status (and therefore
    /// kind and channel) is already known. Under running status the first
    /// data byte has already been consumed and is passed in as `first`.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        kind: VoiceKind,
        channel: Channel,
        first: Option<u8>,
    ) -> ReadResult<Self> {
        let d1 = match first {
            Some(byte) => {
                DataByte::new(byte).map_err(|e| ParseError::new(reader.position(), e.into()))?
            }
            None => read_data_byte(reader)?,
        };

        let voice = match kind {
            VoiceKind::NoteOff => VoiceEvent::NoteOff {
                note: d1,
                velocity: read_data_byte(reader)?,
            },
            VoiceKind::NoteOn => VoiceEvent::NoteOn {
                note: d1,
                velocity: read_data_byte(reader)?,
            },
            VoiceKind::PolyPressure => VoiceEvent::PolyPressure {
                note: d1,
                pressure: read_data_byte(reader)?,
            },
            VoiceKind::ControlChange => VoiceEvent::ControlChange {
                controller: d1,
                value: read_data_byte(reader)?,
            },
            VoiceKind::ProgramChange => VoiceEvent::ProgramChange { program: d1 },
            VoiceKind::ChannelPressure => VoiceEvent::ChannelPressure { pressure: d1 },
            VoiceKind::PitchBend => VoiceEvent::PitchBend {
                lsb: d1,
                msb: read_data_byte(reader)?,
            },
        };

        Ok(Self { channel, voice })
    }
}

fn read_data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let position = reader.position();
    let byte = reader.read_u8()?;
    DataByte::new(byte).map_err(|e| ParseError::new(position, e.into()))
}

/// The channel voice operation kinds, by status-byte high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n`: release a note.
    NoteOff = 0x8,
    /// `0x9n`: strike a note (velocity 0 doubles as a release).
    NoteOn = 0x9,
    /// `0xAn`: per-note aftertouch.
    PolyPressure = 0xA,
    /// `0xBn`: controller value change.
    ControlChange = 0xB,
    /// `0xCn`: instrument selection.
    ProgramChange = 0xC,
    /// `0xDn`: whole-channel aftertouch.
    ChannelPressure = 0xD,
    /// `0xEn`: pitch wheel position.
    PitchBend = 0xE,
}

impl VoiceKind {
    /// The number of data bytes the kind carries on the wire.
    pub const fn data_len(&self) -> u32 {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
A channel voice operation and its data bytes.

Note-bearing kinds ([`NoteOn`](Self::NoteOn), [`NoteOff`](Self::NoteOff),
[`PolyPressure`](Self::PolyPressure)) store the note number in their first
data byte; the alteration engine reaches it through
[`note`](Self::note)/[`set_note`](Self::set_note).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Release a note.
    NoteOff {
        /// The note number.
        note: DataByte,
        /// The release velocity.
        velocity: DataByte,
    },
    /// Strike a note.
    NoteOn {
        /// The note number.
        note: DataByte,
        /// The strike velocity.
        velocity: DataByte,
    },
    /// Per-note aftertouch.
    PolyPressure {
        /// The note number.
        note: DataByte,
        /// The pressure amount.
        pressure: DataByte,
    },
    /// Controller value change.
    ControlChange {
        /// The controller number.
        controller: DataByte,
        /// The new controller value.
        value: DataByte,
    },
    /// Instrument selection.
    ProgramChange {
        /// The program (instrument) number.
        program: DataByte,
    },
    /// Whole-channel aftertouch.
    ChannelPressure {
        /// The pressure amount.
        pressure: DataByte,
    },
    /// Pitch wheel position, a 14-bit value split over two data bytes.
    PitchBend {
        /// The low 7 bits.
        lsb: DataByte,
        /// The high 7 bits.
        msb: DataByte,
    },
}

impl VoiceEvent {
    /// The operation kind.
    pub const fn kind(&self) -> VoiceKind {
        match self {
            Self::NoteOff { .. } => VoiceKind::NoteOff,
            Self::NoteOn { .. } => VoiceKind::NoteOn,
            Self::PolyPressure { .. } => VoiceKind::PolyPressure,
            Self::ControlChange { .. } => VoiceKind::ControlChange,
            Self::ProgramChange { .. } => VoiceKind::ProgramChange,
            Self::ChannelPressure { .. } => VoiceKind::ChannelPressure,
            Self::PitchBend { .. } => VoiceKind::PitchBend,
        }
    }

    /// True for the note-bearing kinds.
    pub const fn is_note(&self) -> bool {
        matches!(
            self,
            Self::NoteOff { .. } | Self::NoteOn { .. } | Self::PolyPressure { .. }
        )
    }

    /// The note number of a note-bearing event.
    pub const fn note(&self) -> Option<u8> {
        match self {
            Self::NoteOff { note, .. }
            | Self::NoteOn { note, .. }
            | Self::PolyPressure { note, .. } => Some(note.value()),
            _ => None,
        }
    }

    /// Replaces the note number; `false` when the event carries no note.
    pub const fn set_note(&mut self, new: DataByte) -> bool {
        match self {
            Self::NoteOff { note, .. }
            | Self::NoteOn { note, .. }
            | Self::PolyPressure { note, .. } => {
                *note = new;
                true
            }
            _ => false,
        }
    }

    /// The 14-bit value of a pitch-bend event.
    pub const fn bend_value(&self) -> Option<u16> {
        match self {
            Self::PitchBend { lsb, msb } => {
                Some(((msb.value() as u16) << 7) | lsb.value() as u16)
            }
            _ => None,
        }
    }
}
