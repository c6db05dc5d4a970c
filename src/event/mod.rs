#![doc = r#"
The in-memory event model.

A track body is a stream of [`Event`]s. Each carries a delta-time (ticks
since the previous event in the same track, VLQ-encoded on the wire) and
one of three payload families:

```text
          |-------|
          | Event |
          |-------|
         /    |    \
|---------| |-------| |------|
| Channel | | SysEx | | Meta |
|---------| |-------| |------|
```

The payload is a sum type rather than a raw tag-plus-union, so every
consumer matches exhaustively over the three families.
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

use crate::{
    bytes::{Channel, DataByte},
    vlq,
};

#[doc = r#"
A single delta-timed event within a track.

Delta-times are capped at [`vlq::MAX`] wherever they are written, so every
stored event remains VLQ-encodable.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    delta_time: u32,
    payload: EventPayload,
}

/// The three wire-event families.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventPayload {
    /// A channel voice event (note on/off, program change, ...).
    Channel(ChannelEvent),
    /// A system-exclusive data block.
    SysEx(SysExEvent),
    /// A non-sounding file annotation (tempo, track name, ...).
    Meta(MetaEvent),
}

impl Event {
    /// Creates an event; `delta_time` is capped at [`vlq::MAX`].
    pub fn new(delta_time: u32, payload: EventPayload) -> Self {
        Self {
            delta_time: delta_time.min(vlq::MAX),
            payload,
        }
    }

    /// Ticks since the previous event in the same track.
    pub const fn delta_time(&self) -> u32 {
        self.delta_time
    }

    /// Replaces the delta-time, capping at [`vlq::MAX`].
    pub fn set_delta_time(&mut self, ticks: u32) {
        self.delta_time = ticks.min(vlq::MAX);
    }

    /// The event's payload.
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Mutable access to the payload.
    pub const fn payload_mut(&mut self) -> &mut EventPayload {
        &mut self.payload
    }

    /// True only for note-on, note-off, and polyphonic-pressure events.
    pub const fn is_note_event(&self) -> bool {
        match &self.payload {
            EventPayload::Channel(c) => c.voice().is_note(),
            _ => false,
        }
    }

    /// The note number, when [`is_note_event`](Self::is_note_event).
    pub const fn note(&self) -> Option<u8> {
        match &self.payload {
            EventPayload::Channel(c) => c.voice().note(),
            _ => None,
        }
    }

    /// Replaces the note number of a note-bearing event.
    ///
    /// Returns `false`, touching nothing, when the event carries no note.
    pub fn set_note(&mut self, note: DataByte) -> bool {
        match &mut self.payload {
            EventPayload::Channel(c) => c.voice_mut().set_note(note),
            _ => false,
        }
    }

    /// True for program-change events.
    pub const fn is_program_change(&self) -> bool {
        self.program().is_some()
    }

    /// The program number, when [`is_program_change`](Self::is_program_change).
    pub const fn program(&self) -> Option<u8> {
        match &self.payload {
            EventPayload::Channel(ChannelEvent {
                voice: VoiceEvent::ProgramChange { program },
                ..
            }) => Some(program.value()),
            _ => None,
        }
    }

    /// Replaces the program number of a program-change event.
    ///
    /// Returns `false`, touching nothing, for any other event.
    pub fn set_program(&mut self, program: DataByte) -> bool {
        match &mut self.payload {
            EventPayload::Channel(ChannelEvent {
                voice: VoiceEvent::ProgramChange { program: p },
                ..
            }) => {
                *p = program;
                true
            }
            _ => false,
        }
    }

    /// The channel of a channel event, `None` for meta and sysex.
    pub const fn channel(&self) -> Option<Channel> {
        match &self.payload {
            EventPayload::Channel(c) => Some(c.channel()),
            _ => None,
        }
    }

    /// Reassigns the channel of a channel event.
    ///
    /// Returns `false` for meta and sysex events.
    pub fn set_channel(&mut self, channel: Channel) -> bool {
        match &mut self.payload {
            EventPayload::Channel(c) => {
                c.set_channel(channel);
                true
            }
            _ => false,
        }
    }

    /// The bytes a standalone serialization of this event would take:
    /// the delta-time's VLQ width plus the payload width with an explicit
    /// status byte (running status never assumed).
    pub fn encoded_len(&self) -> u32 {
        vlq::width(self.delta_time) + self.payload.encoded_len()
    }
}

impl EventPayload {
    /// The payload's wire width including its status byte.
    pub fn encoded_len(&self) -> u32 {
        match self {
            Self::Channel(c) => 1 + c.voice().kind().data_len(),
            Self::SysEx(s) => {
                let len = s.data().len() as u32;
                1 + vlq::width(len) + len
            }
            Self::Meta(m) => {
                let len = m.data().len() as u32;
                2 + vlq::width(len) + len
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note_on(note: u8) -> Event {
        Event::new(
            0,
            EventPayload::Channel(ChannelEvent::new(
                Channel::new(0).unwrap(),
                VoiceEvent::NoteOn {
                    note: DataByte::new(note).unwrap(),
                    velocity: DataByte::new(64).unwrap(),
                },
            )),
        )
    }

    #[test]
    fn note_accessors() {
        let mut event = note_on(60);
        assert!(event.is_note_event());
        assert_eq!(event.note(), Some(60));
        assert!(event.set_note(DataByte::new(72).unwrap()));
        assert_eq!(event.note(), Some(72));
        assert!(!event.is_program_change());
        assert_eq!(event.program(), None);
    }

    #[test]
    fn program_accessors() {
        let mut event = Event::new(
            5,
            EventPayload::Channel(ChannelEvent::new(
                Channel::new(3).unwrap(),
                VoiceEvent::ProgramChange {
                    program: DataByte::new(12).unwrap(),
                },
            )),
        );
        assert!(event.is_program_change());
        assert_eq!(event.program(), Some(12));
        assert!(event.set_program(DataByte::new(40).unwrap()));
        assert_eq!(event.program(), Some(40));
        assert!(!event.is_note_event());
        assert!(!event.set_note(DataByte::new(1).unwrap()));
    }

    #[test]
    fn delta_time_caps_at_vlq_max() {
        let mut event = note_on(60);
        event.set_delta_time(u32::MAX);
        assert_eq!(event.delta_time(), vlq::MAX);
    }

    #[test]
    fn encoded_lengths() {
        // 1-byte delta + status + 2 data bytes
        assert_eq!(note_on(60).encoded_len(), 4);

        let meta = Event::new(
            128,
            EventPayload::Meta(MetaEvent::new(MetaEvent::SET_TEMPO, vec![0x07, 0xA1, 0x20])),
        );
        // 2-byte delta + 0xFF + type + 1-byte length + 3 data bytes
        assert_eq!(meta.encoded_len(), 8);

        let sysex = Event::new(
            0,
            EventPayload::SysEx(SysExEvent::new(SysExKind::PacketStart, vec![1, 2, 3])),
        );
        // 1-byte delta + 0xF0 + 1-byte length + 3 data bytes
        assert_eq!(sysex.encoded_len(), 6);
    }
}
