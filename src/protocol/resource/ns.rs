use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::name::{check_domain_name, decode_name, encode_name, encoded_name_len};
use crate::protocol::resource::{RData, NS_TYPE};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Ns {
    name_server: String,
}

impl Ns {
    pub fn new(name_server: &str) -> Result<Self> {
        check_domain_name(name_server)?;
        Ok(Ns {
            name_server: name_server.to_string(),
        })
    }

    pub fn name_server(&self) -> &str {
        &self.name_server
    }

    pub fn set_name_server(&mut self, name_server: &str) -> Result<()> {
        check_domain_name(name_server)?;
        self.name_server = name_server.to_string();
        Ok(())
    }
}

impl RData for Ns {
    const TYPE_VALUE: u16 = NS_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Ns {
            name_server: decode_name(cursor)?,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        encode_name(&self.name_server, buf);
    }

    fn data_len(&self) -> usize {
        encoded_name_len(&self.name_server)
    }
}

impl PartialEq for Ns {
    fn eq(&self, other: &Self) -> bool {
        self.name_server.eq_ignore_ascii_case(&other.name_server)
    }
}

impl Eq for Ns {}

impl Hash for Ns {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name_server.to_ascii_lowercase().hash(state);
    }
}
