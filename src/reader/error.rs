use crate::bytes::ByteOutOfRange;
use thiserror::Error;

#[doc = r#"
An error raised while decoding a MIDI file, tagged with the byte offset
at which it was detected.

All parse errors are fatal to the attempt: no partial [`Song`](crate::Song)
is ever returned, and the parser performs no internal retry.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse failed at byte {position}: {kind}")]
pub struct ParseError {
    position: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    /// Creates an error from an offset and a kind.
    pub const fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// The byte offset into the input at which decoding failed.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// What went wrong.
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The kinds of structural failure the parser distinguishes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A chunk tag did not match the expected four-byte literal.
    #[error("bad chunk magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        /// The tag the parser required (`MThd` or `MTrk`).
        expected: [u8; 4],
        /// The tag actually present.
        found: [u8; 4],
    },
    /// The header's format field was not 0, 1, or 2.
    #[error("unsupported file format {0}")]
    BadFormat(u16),
    /// The input ended mid-structure.
    #[error("input ended before the structure was complete")]
    TruncatedStream,
    /// Event decoding consumed more bytes than the track chunk declared.
    #[error("track events consumed {consumed} bytes of a declared {declared}")]
    ChunkLengthMismatch {
        /// The chunk's declared byte length.
        declared: u32,
        /// Bytes actually consumed by event decoding.
        consumed: u32,
    },
    /// A fixed-length meta event declared the wrong length.
    #[error("meta type {meta_type:#04X} declared length {declared}, expected {expected}")]
    InvalidMetaLength {
        /// The meta-type byte.
        meta_type: u8,
        /// The length the event declared.
        declared: u32,
        /// The length the format fixes for this meta type.
        expected: u32,
    },
    /// A status byte (or a leading data byte with no running status to
    /// fall back on) matched no known event family.
    #[error("unknown event status byte {0:#04X}")]
    UnknownEventType(u8),
    /// A 7-bit data byte had its high bit set.
    #[error("invalid data byte: {0}")]
    InvalidDataByte(#[from] ByteOutOfRange),
}

/// The result type of every fallible read (see [`ParseError`]).
pub type ReadResult<T> = Result<T, ParseError>;
