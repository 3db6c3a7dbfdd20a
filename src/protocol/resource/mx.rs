use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::name::{check_domain_name, decode_name, encode_name, encoded_name_len};
use crate::protocol::resource::{RData, MX_TYPE};
use std::hash::{Hash, Hasher};

/// Mail exchange. Lower preference values are preferred.
#[derive(Debug, Clone)]
pub struct Mx {
    preference: u16,
    exchange: String,
}

impl Mx {
    pub fn new(exchange: &str, preference: u16) -> Result<Self> {
        check_domain_name(exchange)?;
        Ok(Mx {
            preference,
            exchange: exchange.to_string(),
        })
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn set_preference(&mut self, preference: u16) {
        self.preference = preference;
    }

    pub fn set_exchange(&mut self, exchange: &str) -> Result<()> {
        check_domain_name(exchange)?;
        self.exchange = exchange.to_string();
        Ok(())
    }
}

impl RData for Mx {
    const TYPE_VALUE: u16 = MX_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let preference = cursor.take_u16()?;
        let exchange = decode_name(cursor)?;
        Ok(Mx {
            preference,
            exchange,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend(&self.preference.to_be_bytes());
        encode_name(&self.exchange, buf);
    }

    fn data_len(&self) -> usize {
        2 + encoded_name_len(&self.exchange)
    }
}

impl PartialEq for Mx {
    fn eq(&self, other: &Self) -> bool {
        self.preference == other.preference && self.exchange.eq_ignore_ascii_case(&other.exchange)
    }
}

impl Eq for Mx {}

impl Hash for Mx {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.preference.hash(state);
        self.exchange.to_ascii_lowercase().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::protocol::resource::{Mx, RecordData, ResourceRecord};
    use std::convert::TryFrom;

    #[test]
    fn should_return_mx_when_decode_given_preference_and_exchange() {
        let bytes = [
            0u8, 0, 15, 0, 1, 0, 0, 1, 0, 0, 8, 0, 10, 4, b'm', b'a', b'i', b'l', 0,
        ];
        let mut cursor = Cursor::new(&bytes);

        let record = ResourceRecord::try_from(&mut cursor).unwrap();

        assert_eq!(256, record.ttl());
        assert_eq!(&RecordData::Mx(Mx::new("mail.", 10).unwrap()), record.data());
        assert_eq!(bytes.to_vec(), record.to_bytes().unwrap());
    }

    #[test]
    fn should_compare_unequal_when_eq_given_different_preference() {
        let first = Mx::new("mail.foo.", 10).unwrap();
        let second = Mx::new("MAIL.foo.", 20).unwrap();

        assert_ne!(first, second);
        assert_eq!(first, Mx::new("MAIL.foo.", 10).unwrap());
    }
}
