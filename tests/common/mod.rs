//! Hand-assembled MIDI byte streams for the integration tests.
#![allow(dead_code)] // not every test binary uses every fixture

/// A growable MIDI file image.
#[derive(Default)]
pub struct FileBuilder {
    format: u16,
    division: u16,
    tracks: Vec<Vec<u8>>,
}

impl FileBuilder {
    pub fn new(format: u16, division: u16) -> Self {
        Self {
            format,
            division,
            tracks: Vec::new(),
        }
    }

    pub fn track(mut self, body: &[u8]) -> Self {
        self.tracks.push(body.to_vec());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&self.format.to_be_bytes());
        bytes.extend_from_slice(&(self.tracks.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&self.division.to_be_bytes());
        for body in &self.tracks {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
            bytes.extend_from_slice(body);
        }
        bytes
    }
}

pub const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

/// A minimal one-track file: a note struck and released on channel 0.
pub fn simple_file() -> Vec<u8> {
    FileBuilder::new(0, 96)
        .track(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x60, 0x80, 0x3C, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ])
        .build()
}

/// A track body playing one note on the given channel.
pub fn channel_track(channel: u8, note: u8) -> Vec<u8> {
    let mut body = vec![
        0x00,
        0x90 | channel,
        note,
        0x40,
        0x7F,
        0x80 | channel,
        note,
        0x40,
    ];
    body.extend_from_slice(&END_OF_TRACK);
    body
}
