use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::resource::{RData, A_TYPE};
use std::net::Ipv4Addr;

impl RData for Ipv4Addr {
    const TYPE_VALUE: u16 = A_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Ipv4Addr::from(cursor.take_bytes::<4>()?))
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend(&self.octets());
    }

    fn data_len(&self) -> usize {
        4
    }
}
