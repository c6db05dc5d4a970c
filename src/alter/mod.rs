#![doc = r#"
Semantic transformations over a parsed [`Song`].

Every operation takes the song by exclusive mutable access, touches no
hidden state, and reports either the number of events it modified or the
net byte delta a re-serialization would see. An operation that fails
leaves the song exactly as it found it.

The byte-delta contract exists for a future encoder: [`warp_time`] keeps
each track's cached length consistent and returns the aggregate change,
so chunk-length fields could be patched without a full re-encode.
"#]

use crate::{
    bytes::{Channel, DataByte},
    event::Event,
    file::{Division, FormatType, Song, Track},
    vlq,
};
use thiserror::Error;

/// An alteration that could not be applied. The song is left unmodified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AlterError {
    /// An input fell outside its domain.
    #[error("{what} is out of range")]
    OutOfRange {
        /// Which input was rejected.
        what: &'static str,
    },
    /// Every MIDI channel is already addressed by some event.
    #[error("all 16 MIDI channels are already in use")]
    ChannelsExhausted,
    /// The operation cannot be applied to a song of this format.
    #[error("operation is not valid for a {0:?} song")]
    InvalidFormat(FormatType),
}

#[doc = r#"
A 128-entry lookup table for [`remap_notes`] and [`remap_instruments`].

Entries are either a replacement value (0..=127) or the sentinel
[`Remapping::KEEP`] (−1) meaning "leave the original alone".
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remapping {
    table: [Option<DataByte>; 128],
}

impl Remapping {
    /// The "no change" sentinel.
    pub const KEEP: i32 = -1;

    /// Validates a raw table: every entry must be −1..=127.
    pub fn new(table: [i32; 128]) -> Result<Self, AlterError> {
        let mut out = [None; 128];
        for (slot, &entry) in out.iter_mut().zip(table.iter()) {
            *slot = match entry {
                Self::KEEP => None,
                0..=127 => Some(DataByte::new_unchecked(entry as u8)),
                _ => {
                    return Err(AlterError::OutOfRange {
                        what: "remapping entry",
                    });
                }
            };
        }
        Ok(Self { table: out })
    }

    /// A table that changes nothing.
    pub const fn identity() -> Self {
        Self { table: [None; 128] }
    }

    /// Routes `from` to `to`.
    pub fn set(&mut self, from: DataByte, to: DataByte) {
        self.table[from.value() as usize] = Some(to);
    }

    /// The replacement for `value`, or `None` to keep it.
    pub fn get(&self, value: u8) -> Option<DataByte> {
        self.table.get(value as usize).copied().flatten()
    }
}

impl Default for Remapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// Shifts every note-bearing event by `octaves` octaves.
///
/// The note keeps its pitch class; its octave moves by `octaves`, clamped
/// to the 0..=10 range the note byte can express. An event whose shifted
/// note would leave 0..=127 is skipped. Returns the number of events
/// whose note actually changed.
pub fn change_octave(song: &mut Song, octaves: i32) -> usize {
    let mut modified = 0;
    for track in song.tracks_mut() {
        for event in track.events_mut() {
            if shift_event_octave(event, octaves) {
                modified += 1;
            }
        }
    }
    modified
}

fn shift_event_octave(event: &mut Event, octaves: i32) -> bool {
    let Some(note) = event.note() else {
        return false;
    };
    let Some(new) = shifted_note(note, octaves) else {
        return false;
    };
    if new == note {
        return false;
    }
    event.set_note(DataByte::new_unchecked(new))
}

fn shifted_note(note: u8, octaves: i32) -> Option<u8> {
    let target = (i32::from(note / 12) + octaves).clamp(0, 10);
    let candidate = i32::from(note % 12) + target * 12;
    (candidate <= 127).then_some(candidate as u8)
}

/// Scales every delta-time and the song's time division by `multiplier`.
///
/// Each scaled delta-time is clamped to [`vlq::MAX`]. Returns the net
/// byte delta of a re-serialization: the sum over events of the change in
/// VLQ width, plus, for every track whose total length changed, the
/// width change of the length value itself. Cached track lengths are
/// updated to match.
///
/// The multiplier must be finite and positive.
pub fn warp_time(song: &mut Song, multiplier: f32) -> Result<i64, AlterError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(AlterError::OutOfRange {
            what: "time multiplier",
        });
    }

    let mut total: i64 = 0;
    for track in song.tracks_mut() {
        let mut track_delta: i64 = 0;
        for event in track.events_mut() {
            let old = event.delta_time();
            let new = scale_ticks(old, multiplier);
            if new != old {
                track_delta += i64::from(vlq::width(new)) - i64::from(vlq::width(old));
                event.set_delta_time(new);
            }
        }
        if track_delta != 0 {
            let old_len = track.byte_len();
            let new_len = (i64::from(old_len) + track_delta) as u32;
            track.set_byte_len(new_len);
            total += track_delta + i64::from(vlq::width(new_len)) - i64::from(vlq::width(old_len));
        }
    }

    song.set_division(scale_division(song.division(), multiplier));
    let duration = song.tracks().iter().map(Track::tick_len).max().unwrap_or(0);
    song.set_duration(duration);
    Ok(total)
}

fn scale_ticks(ticks: u32, multiplier: f32) -> u32 {
    let scaled = (f64::from(ticks) * f64::from(multiplier)) as u64;
    scaled.min(u64::from(vlq::MAX)) as u32
}

fn scale_division(division: Division, multiplier: f32) -> Division {
    let smpte_bit = division.raw() & 0x8000;
    let magnitude = division.raw() & 0x7FFF;
    let scaled = ((f64::from(magnitude) * f64::from(multiplier)) as u32).min(0x7FFF) as u16;
    Division::new(smpte_bit | scaled)
}

/// Replaces the program of every program-change event via table lookup.
///
/// Entries mapped to the sentinel are skipped. Returns the number of
/// events rewritten.
pub fn remap_instruments(song: &mut Song, mapping: &Remapping) -> usize {
    let mut modified = 0;
    for track in song.tracks_mut() {
        for event in track.events_mut() {
            if let Some(program) = event.program()
                && let Some(new) = mapping.get(program)
            {
                event.set_program(new);
                modified += 1;
            }
        }
    }
    modified
}

/// Replaces the note of every note-bearing event via table lookup.
///
/// Entries mapped to the sentinel are skipped. Returns the number of
/// events rewritten.
pub fn remap_notes(song: &mut Song, mapping: &Remapping) -> usize {
    let mut modified = 0;
    for track in song.tracks_mut() {
        for event in track.events_mut() {
            if let Some(note) = event.note()
                && let Some(new) = mapping.get(note)
            {
                event.set_note(new);
                modified += 1;
            }
        }
    }
    modified
}

/// Appends a round (canon) voice: a copy of the track at `track_index`,
/// octave-shifted by `octave_diff`, playing `instrument`, on the smallest
/// MIDI channel the song does not already use, and delayed by
/// `delay_ticks` (added to the copy's first delta-time).
///
/// Fails with [`AlterError::InvalidFormat`] for format 2 songs (their
/// tracks are independent sequences and cannot be layered), with
/// [`AlterError::OutOfRange`] for a bad track index, and with
/// [`AlterError::ChannelsExhausted`] when all 16 channels are taken. On
/// failure the song is untouched.
///
/// On success the song holds one more track, format 0 is promoted to
/// format 1, and the aggregate duration grows by the new track's length.
pub fn add_round(
    song: &mut Song,
    track_index: usize,
    octave_diff: i32,
    delay_ticks: u32,
    instrument: DataByte,
) -> Result<(), AlterError> {
    if song.format() == FormatType::SequentiallyIndependent {
        return Err(AlterError::InvalidFormat(song.format()));
    }
    let Some(original) = song.tracks().get(track_index) else {
        return Err(AlterError::OutOfRange {
            what: "track index",
        });
    };

    let mask = song.channel_mask();
    let free = (0u8..16)
        .find(|c| mask & (1 << c) == 0)
        .ok_or(AlterError::ChannelsExhausted)?;
    let channel = Channel::new_unchecked(free);

    let mut events = original.events().to_vec();
    for event in &mut events {
        shift_event_octave(event, octave_diff);
        if event.is_program_change() {
            event.set_program(instrument);
        }
        event.set_channel(channel);
    }
    if let Some(first) = events.first_mut() {
        first.set_delta_time(first.delta_time().saturating_add(delay_ticks));
    }

    let track = Track::new(events);
    let added = track.tick_len();
    song.add_track(track);
    song.set_duration(song.duration() + added);
    Ok(())
}
