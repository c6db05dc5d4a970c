use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The header's format code: how the file's tracks relate to each other.

Format 0 holds exactly one track; a song promotes itself to format 1 the
moment a second track is added.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track carrying every channel.
    SingleMultiChannel = 0,
    /// Format 1: multiple tracks played simultaneously.
    Simultaneous = 1,
    /// Format 2: multiple independent single-track sequences.
    SequentiallyIndependent = 2,
}
