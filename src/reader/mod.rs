#![doc = r#"
Byte-stream reading for the chunk parser.

[`Reader`] is a strict sequential pull over a borrowed byte slice. Every
read either yields bytes or fails with a positioned
[`ParseError`]; nothing is buffered or read speculatively.
"#]

mod error;
pub use error::*;

/// A forward-only cursor over the bytes of a MIDI file.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Wraps a byte slice, starting at offset 0.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The byte offset of the next read.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes remaining in the stream.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Reads exactly `n` bytes, failing with
    /// [`ParseErrorKind::TruncatedStream`] if fewer remain.
    pub fn read_bytes(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| self.truncated())?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Reads a fixed-size array off the stream.
    pub fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let slice = self.read_bytes(1)?;
        Ok(slice[0])
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_array::<2>().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_array::<4>().map(u32::from_be_bytes)
    }

    /// Advances past `n` bytes without inspecting them.
    pub fn skip(&mut self, n: usize) -> ReadResult<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// A truncation error at the current position.
    pub(crate) fn truncated(&self) -> ParseError {
        ParseError::new(self.position, ParseErrorKind::TruncatedStream)
    }

    /// An error of `kind` at the current position.
    pub(crate) fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.position, kind)
    }
}
