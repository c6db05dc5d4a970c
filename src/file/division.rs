#[doc = r#"
The header's time-division word.

A clear high bit means ticks per quarter note; a set high bit means
SMPTE-based timing (negative frames-per-second in the high byte, ticks per
frame in the low byte). The raw 16-bit magnitude is kept so alterations
can rescale it numerically.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Division(pub(crate) u16);

impl Division {
    /// Wraps a raw division word.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw 16-bit word as stored in the header.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// True when the division is SMPTE-based.
    pub const fn is_smpte(&self) -> bool {
        self.0 & 0x8000 != 0
    }

    /// The tick rate, when the division is not SMPTE-based.
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        if self.is_smpte() {
            None
        } else {
            Some(self.0 & 0x7FFF)
        }
    }
}
