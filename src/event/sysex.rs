use crate::{
    reader::{ReadResult, Reader},
    vlq,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Whether a sysex event opens a packet or continues/escapes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SysExKind {
    /// `0xF0`: the start of a system-exclusive packet.
    PacketStart = 0xF0,
    /// `0xF7`: a packet continuation, or an escaped raw byte run.
    PacketEscape = 0xF7,
}

#[doc = r#"
A system-exclusive event: a vendor-defined raw data block.

The wire form is the `0xF0`/`0xF7` status byte, a VLQ-encoded length, then
that many raw bytes.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysExEvent {
    pub(crate) kind: SysExKind,
    pub(crate) data: Vec<u8>,
}

impl SysExEvent {
    /// Creates a sysex event from a kind and raw payload.
    pub const fn new(kind: SysExKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Packet start or continuation/escape.
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads the length-prefixed payload, the status byte already consumed.
    pub(crate) fn read(reader: &mut Reader<'_>, kind: SysExKind) -> ReadResult<Self> {
        let declared = vlq::decode(reader)?.value;
        let data = reader.read_bytes(declared as usize)?.to_vec();
        Ok(Self::new(kind, data))
    }
}
