#![doc = r#"
Variable-length quantity arithmetic.

Delta-times and some event lengths are stored as a big-endian base-128
integer: each byte carries 7 bits of payload, and a set high bit flags a
continuation. The largest representable value in the four bytes the format
allows is [`MAX`].

[`width`] computes a value's encoded size without encoding it; the
alteration engine relies on that to report byte deltas cheaply.
"#]

use crate::reader::{ReadResult, Reader};

/// The largest value a four-byte VLQ can hold (28 payload bits).
pub const MAX: u32 = 0x0FFF_FFFF;

/// A decoded variable-length quantity and the number of bytes it occupied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Vlq {
    /// The decoded value.
    pub value: u32,
    /// Bytes consumed from the stream.
    pub width: u32,
}

/// Reads one variable-length quantity from the stream.
///
/// Fails with
/// [`TruncatedStream`](crate::reader::ParseErrorKind::TruncatedStream) if
/// the input ends before a byte with a clear high bit terminates the
/// quantity.
pub fn decode(reader: &mut Reader<'_>) -> ReadResult<Vlq> {
    let mut value: u32 = 0;
    let mut width: u32 = 0;
    loop {
        let byte = reader.read_u8()?;
        width += 1;
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok(Vlq { value, width });
        }
    }
}

/// Returns the number of bytes needed to encode `value`, between 1 and 4.
///
/// Values at or above [`MAX`] clamp to the four-byte maximum. Pure; no
/// encoding is performed.
pub const fn width(value: u32) -> u32 {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else {
        4
    }
}

/// Appends the encoding of `value` to `out` and returns the bytes written.
///
/// `value` is clamped to [`MAX`] first. The crate never writes files; this
/// exists so the width arithmetic is checkable against a real encoding.
pub fn encode_into(value: u32, out: &mut Vec<u8>) -> u32 {
    let value = value.min(MAX);
    let n = width(value);
    for i in (0..n).rev() {
        let mut byte = ((value >> (7 * i)) & 0x7F) as u8;
        if i != 0 {
            byte |= 0x80;
        }
        out.push(byte);
    }
    n
}
