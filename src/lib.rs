#![doc = r#"
# midilib

Parse Standard MIDI Files into an in-memory [`Song`], alter that model
in place, and keep a searchable [`Catalog`] of parsed songs.

# Overview

A Standard MIDI File is a sequence of tagged, length-prefixed chunks: one
header chunk (`MThd`) followed by one track chunk (`MTrk`) per track. Each
track body is a stream of delta-timed events in one of three families:
channel voice events, system-exclusive events, and meta events.

```rust
use midilib::prelude::*;

let bytes: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60,             // format 0, 1 track, 96 tpqn
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C, // MTrk, length 12
    0x00, 0x90, 0x3C, 0x40,                         // note on, C4
    0x60, 0x80, 0x3C, 0x40,                         // note off
    0x00, 0xFF, 0x2F, 0x00,                         // end of track
];

let song = Song::parse(bytes).unwrap();
assert_eq!(song.tracks().len(), 1);
```

Alterations ([`change_octave`], [`warp_time`], [`remap_notes`],
[`remap_instruments`], [`add_round`]) mutate a song exclusively and report
either the number of events they touched or the net byte delta a
re-serialization would see. No operation here writes files back to disk;
the byte bookkeeping exists so an encoder could update chunk lengths
without a full re-encode.
"#]
#![warn(missing_docs)]

mod bytes;
pub use bytes::*;

pub mod vlq;

mod event;
pub use event::*;

mod file;
pub use file::*;

pub mod reader;

mod alter;
pub use alter::*;

mod catalog;
pub use catalog::*;

#[doc = r#"
Convenient re-exports for working with songs, alterations, and the catalog.
"#]
pub mod prelude {
    pub use crate::{
        alter::{
            AlterError, Remapping, add_round, change_octave, remap_instruments, remap_notes,
            warp_time,
        },
        bytes::{Channel, DataByte},
        catalog::{Catalog, DuplicateSong, NotFound, TraversalOrder},
        event::{
            ChannelEvent, Event, EventPayload, MetaEvent, SysExEvent, SysExKind, VoiceEvent,
            VoiceKind,
        },
        file::{Division, FormatType, ParseWarning, Song, Track},
        reader::{ParseError, ParseErrorKind},
        vlq,
    };
}
