use thiserror::Error;

#[doc = r#"
A 7-bit MIDI data byte (0..=127).

Every payload field of a channel voice event (note numbers, velocities,
controller values, program numbers) is constrained to 7 bits on the wire;
a set high bit marks a status byte instead. Construction is checked so an
out-of-domain value can never be stored.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Checks that the high bit is clear.
    pub const fn new(byte: u8) -> Result<Self, ByteOutOfRange> {
        if byte > 0x7F {
            Err(ByteOutOfRange {
                value: byte,
                max: 0x7F,
            })
        } else {
            Ok(Self(byte))
        }
    }

    /// Creates a data byte without checking the high bit.
    ///
    /// Callers must guarantee `byte <= 0x7F`.
    pub(crate) const fn new_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the underlying byte.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ByteOutOfRange;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::new(byte)
    }
}

impl From<DataByte> for u8 {
    fn from(byte: DataByte) -> Self {
        byte.0
    }
}

#[doc = r#"
A MIDI channel number (0..=15).

Channels are carried in the low nibble of a channel event's status byte.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(pub(crate) u8);

impl Channel {
    /// Checks that the channel fits in a nibble.
    pub const fn new(channel: u8) -> Result<Self, ByteOutOfRange> {
        if channel > 0x0F {
            Err(ByteOutOfRange {
                value: channel,
                max: 0x0F,
            })
        } else {
            Ok(Self(channel))
        }
    }

    pub(crate) const fn from_status(status: u8) -> Self {
        Self(status & 0x0F)
    }

    /// Creates a channel without checking the nibble bound.
    ///
    /// Callers must guarantee `channel <= 0x0F`.
    pub(crate) const fn new_unchecked(channel: u8) -> Self {
        Self(channel)
    }

    /// Returns the channel number.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = ByteOutOfRange;

    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        Self::new(channel)
    }
}

/// A byte did not fit the 7-bit (or 4-bit, for channels) domain.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("byte {value:#04X} is out of range (max {max:#04X})")]
pub struct ByteOutOfRange {
    /// The offending value.
    pub value: u8,
    /// The largest permitted value.
    pub max: u8,
}
