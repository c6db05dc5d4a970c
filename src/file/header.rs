use super::{Division, FormatType};
use crate::reader::{ParseError, ParseErrorKind, ReadResult, Reader};

pub(crate) const HEADER_MAGIC: &[u8; 4] = b"MThd";
const HEADER_BODY_LEN: u32 = 6;

/// The decoded fields of the `MThd` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawHeader {
    pub format: FormatType,
    pub num_tracks: u16,
    pub division: Division,
}

impl RawHeader {
    /// Reads the header chunk from the front of the stream.
    ///
    /// The declared chunk length is trusted only for skipping: the 6-byte
    /// body is always read, and any surplus the length declares beyond it
    /// is stepped over.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag_position = reader.position();
        let tag = reader.read_array::<4>()?;
        if &tag != HEADER_MAGIC {
            return Err(ParseError::new(
                tag_position,
                ParseErrorKind::BadMagic {
                    expected: *HEADER_MAGIC,
                    found: tag,
                },
            ));
        }

        let declared = reader.read_u32_be()?;

        let format_position = reader.position();
        let format_raw = reader.read_u16_be()?;
        let format = FormatType::try_from(format_raw)
            .map_err(|_| ParseError::new(format_position, ParseErrorKind::BadFormat(format_raw)))?;

        let num_tracks = reader.read_u16_be()?;
        let division = Division::new(reader.read_u16_be()?);

        if declared > HEADER_BODY_LEN {
            reader.skip((declared - HEADER_BODY_LEN) as usize)?;
        }

        Ok(Self {
            format,
            num_tracks,
            division,
        })
    }
}
