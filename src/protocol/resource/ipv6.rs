use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::resource::{RData, AAAA_TYPE};
use std::net::Ipv6Addr;

impl RData for Ipv6Addr {
    const TYPE_VALUE: u16 = AAAA_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Ipv6Addr::from(cursor.take_bytes::<16>()?))
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend(&self.octets());
    }

    fn data_len(&self) -> usize {
        16
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::protocol::resource::{RecordData, ResourceRecord};
    use std::convert::TryFrom;
    use std::net::Ipv6Addr;

    #[test]
    fn should_return_aaaa_record_when_decode_given_sixteen_byte_rdata() {
        let mut bytes = vec![0u8, 0, 28, 0, 1, 0, 0, 0, 60, 0, 16];
        bytes.extend(&Ipv6Addr::LOCALHOST.octets());
        let mut cursor = Cursor::new(&bytes);

        let record = ResourceRecord::try_from(&mut cursor).unwrap();

        assert_eq!(&RecordData::AAAA(Ipv6Addr::LOCALHOST), record.data());
        assert_eq!(16, record.rd_length());
        assert_eq!(bytes, record.to_bytes().unwrap());
    }

    #[test]
    fn should_return_validation_when_decode_given_rdlength_four() {
        let bytes = [0u8, 0, 28, 0, 1, 0, 0, 0, 60, 0, 4, 1, 2, 3, 4];
        let mut cursor = Cursor::new(&bytes);

        let result = ResourceRecord::try_from(&mut cursor);

        assert!(result.unwrap_err().is_validation());
    }
}
