use crate::cursor::Cursor;
use crate::error::Result;
use std::convert::TryFrom;

pub const HEADER_LEN: usize = 12;

const QR_BIT: u8 = 0x80;
const RCODE_MASK: u8 = 0x0F;

/// The fixed 12-byte message header.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// QR, opcode and the AA/TC/RD bits.
    pub fn flags_high(&self) -> u8 {
        (self.flags >> 8) as u8
    }

    /// RA, the reserved Z bits and the response code.
    pub fn flags_low(&self) -> u8 {
        (self.flags & 0x00FF) as u8
    }

    pub fn is_response(&self) -> bool {
        self.flags_high() & QR_BIT == QR_BIT
    }

    pub fn rcode_bits(&self) -> u8 {
        self.flags_low() & RCODE_MASK
    }
}

impl<'a, 'b> TryFrom<&'a mut Cursor<'b>> for Header {
    type Error = crate::error::DnsError;

    fn try_from(cursor: &'a mut Cursor<'b>) -> Result<Self> {
        Ok(Header {
            id: cursor.take_u16()?,
            flags: cursor.take_u16()?,
            question_count: cursor.take_u16()?,
            answer_count: cursor.take_u16()?,
            authority_count: cursor.take_u16()?,
            additional_count: cursor.take_u16()?,
        })
    }
}

impl From<&Header> for Vec<u8> {
    fn from(header: &Header) -> Self {
        let mut result = Vec::with_capacity(HEADER_LEN);
        result.extend(&header.id.to_be_bytes());
        result.extend(&header.flags.to_be_bytes());
        result.extend(&header.question_count.to_be_bytes());
        result.extend(&header.answer_count.to_be_bytes());
        result.extend(&header.authority_count.to_be_bytes());
        result.extend(&header.additional_count.to_be_bytes());
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::protocol::header::Header;
    use std::convert::TryFrom;

    #[test]
    fn should_split_flag_bytes_when_decode_given_response_header() {
        let bytes = [0x12, 0x34, 0x81, 0x83, 0, 1, 0, 2, 0, 3, 0, 4];
        let mut cursor = Cursor::new(&bytes);

        let header = Header::try_from(&mut cursor).unwrap();

        assert_eq!(0x1234, header.id);
        assert!(header.is_response());
        assert_eq!(0x81, header.flags_high());
        assert_eq!(3, header.rcode_bits());
        assert_eq!((1, 2, 3, 4), (header.question_count, header.answer_count,
                                  header.authority_count, header.additional_count));
        let encoded: Vec<u8> = (&header).into();
        assert_eq!(bytes.to_vec(), encoded);
    }

    #[test]
    fn should_return_incomplete_when_decode_given_eleven_bytes() {
        let bytes = [0u8; 11];
        let mut cursor = Cursor::new(&bytes);

        let result = Header::try_from(&mut cursor);

        assert!(result.unwrap_err().is_incomplete());
    }
}
